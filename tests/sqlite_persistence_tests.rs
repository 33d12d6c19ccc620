#![cfg(feature = "sqlite")]

use duty_roster::{
    Cell, Grid, Period, RosterStore, Schedule, SqliteRosterStore, extract_roster,
    import_roster_file,
};
use std::fs;
use tempfile::{NamedTempFile, tempdir};

fn t(s: &str) -> Cell {
    Cell::text(s)
}

fn sample_schedule() -> Schedule {
    let grid = Grid::new(vec![
        vec![Cell::Empty, Cell::Empty, t("Alice"), t("Bob"), t("Carol")],
        vec![Cell::Int(1), Cell::Empty, t("Д"), t("В"), t("Р")],
        vec![Cell::Int(2), Cell::Empty, t("В"), t("Д"), t("")],
    ]);
    extract_roster(&grid).unwrap()
}

#[test]
fn sqlite_store_round_trip_roster() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteRosterStore::new(file.path()).unwrap();
    let period = Period::new(2, 2025);
    let schedule = sample_schedule();

    store.save_roster(period, &schedule).expect("save roster");

    let loaded = store
        .load_roster(period)
        .expect("load roster")
        .expect("roster exists");
    assert_eq!(loaded, schedule);
    assert_eq!(loaded.employees(), ["Alice", "Bob", "Carol"]);
    assert_eq!(loaded.get_day_schedule(2).unwrap()["Carol"], "");

    assert!(store.load_roster(Period::new(3, 2025)).unwrap().is_none());
}

#[test]
fn saving_a_period_again_replaces_it() {
    let store = SqliteRosterStore::in_memory().unwrap();
    let period = Period::new(2, 2025);
    let mut schedule = sample_schedule();
    store.save_roster(period, &schedule).unwrap();

    assert!(schedule.swap_shifts(1, 2, "Alice", "Alice"));
    store.save_roster(period, &schedule).unwrap();

    let loaded = store.load_roster(period).unwrap().unwrap();
    assert_eq!(loaded.get_day_schedule(1).unwrap()["Alice"], "В");
    assert_eq!(loaded.get_day_schedule(2).unwrap()["Alice"], "Д");
    assert_eq!(
        store.shift_for(period, 2, "Alice").unwrap(),
        Some("Д".to_string())
    );
    assert_eq!(store.shift_for(period, 9, "Alice").unwrap(), None);
}

#[test]
fn employees_are_shared_across_periods() {
    let store = SqliteRosterStore::in_memory().unwrap();
    let schedule = sample_schedule();
    store.save_roster(Period::new(1, 2025), &schedule).unwrap();
    store.save_roster(Period::new(2, 2025), &schedule).unwrap();

    assert_eq!(store.employees().unwrap(), vec!["Alice", "Bob", "Carol"]);
    assert!(store.load_roster(Period::new(1, 2025)).unwrap().is_some());
}

#[test]
fn import_reads_period_from_file_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("11_roster_2024.csv");
    fs::write(
        &path,
        "Name,,Alice,Bob\n1,Fri,Д,В\n2,Sat,В,Д\n3,Sun,Р,Р\n",
    )
    .unwrap();

    let store = SqliteRosterStore::in_memory().unwrap();
    let summary = import_roster_file(&path, &store).unwrap();
    assert_eq!(summary.period, Period::new(11, 2024));
    assert_eq!(summary.employees, 2);
    assert_eq!(summary.days, 3);

    let loaded = store.load_roster(Period::new(11, 2024)).unwrap().unwrap();
    assert_eq!(loaded.get_day_schedule(3).unwrap()["Bob"], "Р");
}

#[test]
fn duplicate_day_numbers_are_not_stored() {
    let grid = Grid::new(vec![
        vec![Cell::Empty, Cell::Empty, t("Alice")],
        vec![Cell::Int(1), Cell::Empty, t("Д")],
        vec![Cell::Int(1), Cell::Empty, t("В")],
    ]);
    let schedule = extract_roster(&grid).unwrap();
    let store = SqliteRosterStore::in_memory().unwrap();
    assert!(store.save_roster(Period::new(1, 2025), &schedule).is_err());
    assert!(store.load_roster(Period::new(1, 2025)).unwrap().is_none());
}
