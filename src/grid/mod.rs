use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod builder;
pub mod loader;
pub mod locator;

pub use builder::{RosterError, build, extract_roster};
pub use loader::{GridLoadError, grid_from_csv_reader, load_grid, load_grid_from_csv, load_grid_from_xlsx};
pub use locator::{Anchor, ColumnSpan, GridLocation, locate};

/// A single decoded spreadsheet value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Cell {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Numeric 1 and the trimmed text "1" both mark day one of a roster.
    pub fn is_anchor(&self) -> bool {
        match self {
            Cell::Int(v) => *v == 1,
            Cell::Float(v) => *v == 1.0,
            Cell::Text(s) => s.trim() == "1",
            Cell::Empty => false,
        }
    }

    /// Numeric value usable as a day number. NaN never qualifies.
    pub fn as_day_number(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            Cell::Float(v) if !v.is_nan() => Some(*v as i64),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Int(_) | Cell::Float(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{}", *v as i64),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// Header-less, possibly ragged block of cells. Coordinates past the end of a
/// row or past the last row read as [`Cell::Empty`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

static EMPTY: Cell = Cell::Empty;

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl From<Vec<Vec<Cell>>> for Grid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(rows)
    }
}

/// Structural reasons a grid cannot be read as a roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no cell with value 1 marks the start of the roster")]
    AnchorNotFound,
    #[error("anchor in column {column} sits on the first row, no employee header above it")]
    NoRowAbove { column: usize },
    #[error("no employee names found in row {row} starting at column {column}")]
    NoEmployeesFound { row: usize, column: usize },
}
