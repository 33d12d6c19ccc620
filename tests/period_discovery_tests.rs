use duty_roster::{Period, PeriodError, extract_period, find_roster_file};
use std::fs;
use tempfile::tempdir;

#[test]
fn period_from_typical_file_names() {
    assert_eq!(extract_period("02_roster_2025.xlsx"), Ok(Period::new(2, 2025)));
    assert_eq!(extract_period("7 July 2024.xlsx"), Ok(Period::new(7, 2024)));
    assert_eq!(extract_period("roster-03...2026.xlsx"), Ok(Period::new(3, 2026)));
}

#[test]
fn file_name_without_numbers_is_malformed() {
    assert!(matches!(
        extract_period("roster.xlsx"),
        Err(PeriodError::MalformedFilename(name)) if name == "roster.xlsx"
    ));
}

#[test]
fn discovery_picks_the_matching_workbook() {
    let dir = tempdir().unwrap();
    for name in [
        "01_roster_2025.xlsx",
        "02_roster_2025.csv",
        "notes.xlsx",
        "02_roster_2024.xlsx",
        "02_roster_2025.XLSX",
    ] {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    fs::create_dir(dir.path().join("02_archive_2025.xlsx")).unwrap();

    let found = find_roster_file(dir.path(), Period::new(2, 2025)).unwrap();
    assert_eq!(found, Some(dir.path().join("02_roster_2025.XLSX")));

    let january = find_roster_file(dir.path(), Period::new(1, 2025)).unwrap();
    assert_eq!(january, Some(dir.path().join("01_roster_2025.xlsx")));
}

#[test]
fn discovery_returns_none_when_nothing_matches() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("05_roster_2025.xlsx"), b"").unwrap();
    assert_eq!(find_roster_file(dir.path(), Period::new(6, 2025)).unwrap(), None);
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempdir().unwrap();
    assert!(find_roster_file(dir.path().join("absent"), Period::new(1, 2025)).is_err());
}

#[test]
fn current_period_has_a_valid_month() {
    let period = Period::current();
    assert!((1..=12).contains(&period.month));
    assert!(period.days_in_month().unwrap() >= 28);
}
