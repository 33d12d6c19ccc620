use super::{ExtractionError, Grid, GridLocation, locate};
use crate::schedule::{DayRecord, Schedule, ScheduleError, Shifts};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Walks down the anchor column collecting one record per dated row.
///
/// Dated rows must be contiguous: the first row whose anchor cell is not a
/// number ends the roster, even if numbered rows appear again further down.
/// Shift values are taken as-is; an empty result is not an error here.
pub fn build(grid: &Grid, location: &GridLocation) -> Vec<DayRecord> {
    let column = location.anchor.column;
    let mut records = Vec::new();

    for row in location.anchor.row..grid.height() {
        let Some(day) = grid.get(row, column).as_day_number() else {
            break;
        };
        let shifts: Shifts = location
            .employees
            .iter()
            .zip(location.span.columns())
            .map(|(name, col)| (name.clone(), grid.get(row, col).to_string()))
            .collect();
        records.push(DayRecord::new(day, shifts));
    }

    tracing::debug!(days = records.len(), "built roster rows");
    records
}

/// Locates, builds and wraps a roster in one step.
pub fn extract_roster(grid: &Grid) -> Result<Schedule, RosterError> {
    let location = locate(grid)?;
    let days = build(grid, &location);
    Ok(Schedule::new(location.employees, days)?)
}
