use super::{PersistenceError, PersistenceResult};
use crate::period::Period;
use crate::schedule::{DayRecord, Schedule, Shifts};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct RosterSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    period: Option<Period>,
    employees: Vec<String>,
    days: Vec<DayRecord>,
}

impl RosterSnapshot {
    fn from_schedule(period: Option<Period>, schedule: &Schedule) -> Self {
        Self {
            period,
            employees: schedule.employees().to_vec(),
            days: schedule.get_full_schedule().to_vec(),
        }
    }

    fn into_schedule(self) -> PersistenceResult<(Option<Period>, Schedule)> {
        super::validate_roster(&self.employees, &self.days)?;
        let schedule = Schedule::new(self.employees, self.days)?;
        Ok((self.period, schedule))
    }
}

pub fn save_roster_to_json<P: AsRef<Path>>(
    schedule: &Schedule,
    period: Option<Period>,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = RosterSnapshot::from_schedule(period, schedule);
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_roster_from_json<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<(Option<Period>, Schedule)> {
    let file = File::open(path)?;
    let snapshot: RosterSnapshot = serde_json::from_reader(file)?;
    snapshot.into_schedule()
}

#[derive(Debug, Serialize, Deserialize)]
struct ShiftCsvRecord {
    day: i64,
    employee: String,
    shift: String,
}

/// Long format, one `day,employee,shift` row per assignment, employees in
/// header order within each day.
pub fn save_roster_to_csv<P: AsRef<Path>>(schedule: &Schedule, path: P) -> PersistenceResult<()> {
    super::validate_schedule(schedule)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for record in schedule.get_full_schedule() {
        let mut written = std::collections::HashSet::new();
        for employee in schedule.employees() {
            if !written.insert(employee.as_str()) {
                continue;
            }
            let shift = record.shift_of(employee).unwrap_or_default().to_string();
            writer.serialize(ShiftCsvRecord {
                day: record.day,
                employee: employee.clone(),
                shift,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn load_roster_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut employees: Vec<String> = Vec::new();
    let mut days: Vec<DayRecord> = Vec::new();

    for row in reader.deserialize::<ShiftCsvRecord>() {
        let row = row?;
        if row.employee.trim().is_empty() {
            return Err(PersistenceError::InvalidData(format!(
                "row for day {} has no employee",
                row.day
            )));
        }
        if !employees.contains(&row.employee) {
            employees.push(row.employee.clone());
        }
        match days.iter_mut().find(|record| record.day == row.day) {
            Some(record) => {
                record.shifts.insert(row.employee, row.shift);
            }
            None => {
                let mut shifts = Shifts::new();
                shifts.insert(row.employee, row.shift);
                days.push(DayRecord::new(row.day, shifts));
            }
        }
    }

    super::validate_roster(&employees, &days)?;
    Ok(Schedule::new(employees, days)?)
}
