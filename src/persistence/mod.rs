use crate::grid::{GridLoadError, RosterError};
use crate::period::{Period, PeriodError};
use crate::schedule::{DayRecord, Schedule, ScheduleError};
use polars::prelude::PolarsError;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not load roster grid: {0}")]
    Grid(#[from] GridLoadError),
    #[error("could not read roster: {0}")]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Period(#[from] PeriodError),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<ScheduleError> for PersistenceError {
    fn from(value: ScheduleError) -> Self {
        Self::Roster(RosterError::Schedule(value))
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub trait RosterStore {
    /// Replaces everything stored for `period` with `schedule`.
    fn save_roster(&self, period: Period, schedule: &Schedule) -> PersistenceResult<()>;
    fn load_roster(&self, period: Period) -> PersistenceResult<Option<Schedule>>;
    /// All employee names ever stored, alphabetically.
    fn employees(&self) -> PersistenceResult<Vec<String>>;
}

/// Checks the invariants a stored roster must keep: day numbers are unique and
/// every record covers exactly the schedule's employees.
pub fn validate_roster(employees: &[String], days: &[DayRecord]) -> PersistenceResult<()> {
    let names: HashSet<&str> = employees.iter().map(String::as_str).collect();
    let mut seen_days = HashSet::with_capacity(days.len());
    for record in days {
        if !seen_days.insert(record.day) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate day {}",
                record.day
            )));
        }
        if record.shifts.len() != names.len()
            || record.shifts.keys().any(|name| !names.contains(name.as_str()))
        {
            return Err(PersistenceError::InvalidData(format!(
                "day {} does not match the employee list",
                record.day
            )));
        }
    }
    Ok(())
}

pub fn validate_schedule(schedule: &Schedule) -> PersistenceResult<()> {
    validate_roster(schedule.employees(), schedule.get_full_schedule())
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    load_roster_from_csv, load_roster_from_json, save_roster_to_csv, save_roster_to_json,
};
