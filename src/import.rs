use crate::grid::{extract_roster, load_grid};
use crate::period::{Period, extract_period};
use crate::persistence::{PersistenceError, PersistenceResult, RosterStore};
use crate::schedule::Schedule;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub period: Period,
    pub employees: usize,
    pub days: usize,
}

impl ImportSummary {
    pub fn to_cli_summary(&self) -> String {
        format!(
            "period={}, employees={}, days={}",
            self.period, self.employees, self.days
        )
    }
}

/// Reads the period from the file name and the roster from the file contents.
pub fn read_roster_file<P: AsRef<Path>>(path: P) -> PersistenceResult<(Period, Schedule)> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PersistenceError::InvalidData(format!("{} has no file name", path.display())))?;
    let period = extract_period(name)?;
    let grid = load_grid(path)?;
    let schedule = extract_roster(&grid)?;
    Ok((period, schedule))
}

/// Parses a roster file and stores it under the period named in its file name.
pub fn import_roster_file<P, S>(path: P, store: &S) -> PersistenceResult<ImportSummary>
where
    P: AsRef<Path>,
    S: RosterStore + ?Sized,
{
    let path = path.as_ref();
    let (period, schedule) = read_roster_file(path).inspect_err(|err| {
        tracing::warn!(file = %path.display(), error = %err, "roster import failed");
    })?;
    store.save_roster(period, &schedule)?;

    let summary = ImportSummary {
        period,
        employees: schedule.employees().len(),
        days: schedule.get_full_schedule().len(),
    };
    tracing::info!(file = %path.display(), summary = %summary.to_cli_summary(), "imported roster");
    Ok(summary)
}
