use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

static PERIOD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}).*?(\d{4})").expect("period pattern compiles"));

const ROSTER_EXTENSION: &str = "xlsx";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("file name '{0}' does not contain a month followed by a four-digit year")]
    MalformedFilename(String),
}

/// Month and year a roster file covers. Neither value is range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self::new(today.month(), today.year())
    }

    /// Number of calendar days, or `None` when the month is not 1..=12.
    pub fn days_in_month(&self) -> Option<u32> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?
        };
        Some((next - first).num_days() as u32)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{}", self.month, self.year)
    }
}

/// Takes the first 1-2 digit run as the month and the nearest 4-digit run
/// after it as the year, e.g. `"02_roster_2025.xlsx"` gives 2/2025.
pub fn extract_period(filename: &str) -> Result<Period, PeriodError> {
    let malformed = || PeriodError::MalformedFilename(filename.to_string());
    let captures = PERIOD_PATTERN.captures(filename).ok_or_else(malformed)?;
    let month = captures[1].parse::<u32>().map_err(|_| malformed())?;
    let year = captures[2].parse::<i32>().map_err(|_| malformed())?;
    Ok(Period::new(month, year))
}

/// First `.xlsx` file in `dir` (by name) whose file name encodes `period`.
/// Names without a recognizable period are skipped.
pub fn find_roster_file<P: AsRef<Path>>(dir: P, period: Period) -> std::io::Result<Option<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_roster = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ROSTER_EXTENSION));
        if is_roster {
            candidates.push(path);
        }
    }
    candidates.sort();

    for path in candidates {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match extract_period(name) {
            Ok(found) if found == period => return Ok(Some(path)),
            Ok(_) => {}
            Err(err) => tracing::debug!(file = name, error = %err, "skipping roster candidate"),
        }
    }

    tracing::warn!(dir = %dir.as_ref().display(), %period, "no roster file for period");
    Ok(None)
}

pub fn find_current_roster_file<P: AsRef<Path>>(dir: P) -> std::io::Result<Option<PathBuf>> {
    find_roster_file(dir, Period::current())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_and_year_from_name() {
        assert_eq!(extract_period("02_roster_2025.xlsx"), Ok(Period::new(2, 2025)));
        assert_eq!(extract_period("график 11.2024.xlsx"), Ok(Period::new(11, 2024)));
    }

    #[test]
    fn first_digits_win_even_when_out_of_range() {
        // No semantic check on the month.
        assert_eq!(extract_period("99-1999.xlsx"), Ok(Period::new(99, 1999)));
        // "20" of "2025" is taken as the month, the year must follow it.
        assert_eq!(extract_period("2025_02_2026.xlsx"), Ok(Period::new(20, 2026)));
    }

    #[test]
    fn names_without_a_year_are_malformed() {
        assert_eq!(
            extract_period("roster.xlsx"),
            Err(PeriodError::MalformedFilename("roster.xlsx".into()))
        );
        assert!(extract_period("2025_02.xlsx").is_err());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(Period::new(2, 2024).days_in_month(), Some(29));
        assert_eq!(Period::new(2, 2025).days_in_month(), Some(28));
        assert_eq!(Period::new(12, 2025).days_in_month(), Some(31));
        assert_eq!(Period::new(13, 2025).days_in_month(), None);
    }
}
