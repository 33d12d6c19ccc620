use super::{Cell, Grid};
use calamine::{Data, Reader, open_workbook_auto};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridLoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook {0} has no worksheets")]
    NoWorksheet(String),
    #[error("unsupported roster file format '{0}'")]
    UnsupportedFormat(String),
}

pub type GridLoadResult<T> = Result<T, GridLoadError>;

const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

fn cell_from_workbook(value: &Data) -> Cell {
    match value {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(v) => Cell::Int(*v),
        Data::Float(v) => Cell::Float(*v),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::text(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Reads the first worksheet. Cells keep their absolute sheet coordinates, so
/// leading blank rows and columns come back as [`Cell::Empty`].
pub fn load_grid_from_xlsx<P: AsRef<Path>>(path: P) -> GridLoadResult<Grid> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| GridLoadError::NoWorksheet(path.display().to_string()))??;

    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for cells in range.rows() {
        let mut row = vec![Cell::Empty; col_offset];
        row.extend(cells.iter().map(cell_from_workbook));
        rows.push(row);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded workbook grid");
    Ok(Grid::new(rows))
}

fn cell_from_field(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Cell::Int(v);
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        return Cell::Float(v);
    }
    Cell::Text(field.to_string())
}

/// Header-less CSV; numeric-looking fields become numbers.
pub fn grid_from_csv_reader<R: Read>(reader: R) -> GridLoadResult<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(cell_from_field).collect());
    }
    Ok(Grid::new(rows))
}

pub fn load_grid_from_csv<P: AsRef<Path>>(path: P) -> GridLoadResult<Grid> {
    let file = File::open(path)?;
    grid_from_csv_reader(file)
}

/// Picks a decoder from the file extension.
pub fn load_grid<P: AsRef<Path>>(path: P) -> GridLoadResult<Grid> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if extension == "csv" {
        load_grid_from_csv(path)
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        load_grid_from_xlsx(path)
    } else {
        Err(GridLoadError::UnsupportedFormat(path.display().to_string()))
    }
}
