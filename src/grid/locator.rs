use super::{Cell, ExtractionError, Grid};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Offset from the anchor (date) column to the first employee column.
pub const EMPLOYEE_COLUMN_OFFSET: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub row: usize,
    pub column: usize,
}

/// Half-open range of columns holding shift codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpan {
    pub start: usize,
    pub end: usize,
}

impl ColumnSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn columns(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLocation {
    pub anchor: Anchor,
    pub employees: Vec<String>,
    pub span: ColumnSpan,
}

fn find_anchor(grid: &Grid) -> Option<Anchor> {
    for (row, cells) in grid.rows().enumerate() {
        if let Some(column) = cells.iter().position(Cell::is_anchor) {
            return Some(Anchor { row, column });
        }
    }
    None
}

fn read_employee_header(header: &[Cell], start: usize) -> Vec<String> {
    header
        .iter()
        .skip(start)
        .take_while(|cell| !cell.is_blank())
        .map(|cell| cell.to_string().trim().to_string())
        .collect()
}

/// Finds the roster block in `grid`: the first cell reading 1 (row-major), the
/// employee names on the row above it and the columns those names cover.
pub fn locate(grid: &Grid) -> Result<GridLocation, ExtractionError> {
    let anchor = find_anchor(grid).ok_or(ExtractionError::AnchorNotFound)?;
    if anchor.row == 0 {
        return Err(ExtractionError::NoRowAbove {
            column: anchor.column,
        });
    }

    let header_row = anchor.row - 1;
    let start = anchor.column + EMPLOYEE_COLUMN_OFFSET;
    let employees = read_employee_header(grid.row(header_row), start);
    if employees.is_empty() {
        return Err(ExtractionError::NoEmployeesFound {
            row: header_row,
            column: start,
        });
    }

    let span = ColumnSpan {
        start,
        end: start + employees.len(),
    };
    tracing::debug!(
        anchor_row = anchor.row,
        anchor_column = anchor.column,
        employees = employees.len(),
        "located roster block"
    );

    Ok(GridLocation {
        anchor,
        employees,
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<Cell>>) -> Grid {
        Grid::new(rows)
    }

    #[test]
    fn first_anchor_in_row_major_order_wins() {
        let g = grid(vec![
            vec![Cell::Empty, Cell::Empty, Cell::text("A"), Cell::text("B")],
            vec![Cell::Empty, Cell::text("1"), Cell::Empty, Cell::text("Zed")],
            vec![Cell::Int(1), Cell::Empty, Cell::Empty, Cell::Empty],
        ]);
        let location = locate(&g).unwrap();
        assert_eq!(location.anchor, Anchor { row: 1, column: 1 });
        assert_eq!(location.employees, vec!["B".to_string()]);
        assert_eq!(location.span, ColumnSpan { start: 3, end: 4 });
    }

    #[test]
    fn missing_anchor_is_reported() {
        let g = grid(vec![vec![Cell::text("x"), Cell::Int(2)], vec![Cell::Float(0.5)]]);
        assert_eq!(locate(&g), Err(ExtractionError::AnchorNotFound));
    }

    #[test]
    fn anchor_on_first_row_has_no_header() {
        let g = grid(vec![vec![Cell::Empty, Cell::Int(1)]]);
        assert_eq!(locate(&g), Err(ExtractionError::NoRowAbove { column: 1 }));
    }

    #[test]
    fn blank_header_yields_no_employees() {
        let g = grid(vec![
            vec![Cell::Empty, Cell::Empty, Cell::text("   ")],
            vec![Cell::Int(1), Cell::Empty, Cell::text("Д")],
        ]);
        assert_eq!(
            locate(&g),
            Err(ExtractionError::NoEmployeesFound { row: 0, column: 2 })
        );
    }

    #[test]
    fn header_stops_at_first_blank_and_keeps_duplicates() {
        let g = grid(vec![
            vec![
                Cell::Empty,
                Cell::Empty,
                Cell::text(" Ann "),
                Cell::text("Ann"),
                Cell::Int(7),
                Cell::Empty,
                Cell::text("Ignored"),
            ],
            vec![Cell::Int(1)],
        ]);
        let location = locate(&g).unwrap();
        assert_eq!(location.employees, vec!["Ann", "Ann", "7"]);
        assert_eq!(location.span.columns(), 2..5);
        assert_eq!(location.span.len(), 3);
    }
}
