use crate::shift::ShiftCode;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

const DAY_COLUMN: &str = "day";

/// Employee name to raw shift value for one day.
pub type Shifts = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub day: i64,
    pub shifts: Shifts,
}

impl DayRecord {
    pub fn new(day: i64, shifts: Shifts) -> Self {
        Self { day, shifts }
    }

    pub fn shift_of(&self, employee: &str) -> Option<&str> {
        self.shifts.get(employee).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("roster contains no usable data ({employees} employees, {days} days)")]
    Empty { employees: usize, days: usize },
}

/// One month of parsed roster data. All edits go through [`Schedule::swap_shifts`]
/// and [`Schedule::change_status`]; readers only ever get shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    employees: Vec<String>,
    days: Vec<DayRecord>,
}

impl Schedule {
    pub fn new(employees: Vec<String>, days: Vec<DayRecord>) -> Result<Self, ScheduleError> {
        if employees.is_empty() || days.is_empty() {
            return Err(ScheduleError::Empty {
                employees: employees.len(),
                days: days.len(),
            });
        }
        Ok(Self { employees, days })
    }

    pub fn employees(&self) -> &[String] {
        &self.employees
    }

    pub fn get_full_schedule(&self) -> &[DayRecord] {
        &self.days
    }

    pub fn day_numbers(&self) -> Vec<i64> {
        self.days.iter().map(|record| record.day).collect()
    }

    fn position_of(&self, day: i64) -> Option<usize> {
        self.days.iter().position(|record| record.day == day)
    }

    pub fn get_day_schedule(&self, day: i64) -> Option<&Shifts> {
        self.position_of(day).map(|idx| &self.days[idx].shifts)
    }

    /// Employees whose code on `day` is `code`, in header order.
    pub fn employees_with(&self, day: i64, code: ShiftCode) -> Option<Vec<&str>> {
        let shifts = self.get_day_schedule(day)?;
        let mut seen = HashSet::new();
        Some(
            self.employees
                .iter()
                .filter(|name| seen.insert(name.as_str()))
                .filter(|name| shifts.get(*name).is_some_and(|value| code.matches(value)))
                .map(String::as_str)
                .collect(),
        )
    }

    /// Gives `user1` on `day1` the value `user2` had on `day2` and vice versa.
    /// Returns `false` without touching anything if a day or employee is missing.
    pub fn swap_shifts(&mut self, day1: i64, day2: i64, user1: &str, user2: &str) -> bool {
        let (Some(idx1), Some(idx2)) = (self.position_of(day1), self.position_of(day2)) else {
            return false;
        };
        let (Some(first), Some(second)) = (
            self.days[idx1].shifts.get(user1).cloned(),
            self.days[idx2].shifts.get(user2).cloned(),
        ) else {
            return false;
        };

        self.days[idx1].shifts.insert(user1.to_string(), second);
        self.days[idx2].shifts.insert(user2.to_string(), first);
        tracing::debug!(day1, day2, user1, user2, "swapped shifts");
        true
    }

    pub fn change_status(&mut self, day: i64, user: &str, new_status: &str) -> bool {
        let Ok(code) = new_status.parse::<ShiftCode>() else {
            return false;
        };
        let Some(idx) = self.position_of(day) else {
            return false;
        };
        match self.days[idx].shifts.get_mut(user) {
            Some(value) => {
                *value = code.as_str().to_string();
                tracing::debug!(day, user, code = code.name(), "changed status");
                true
            }
            None => false,
        }
    }

    /// Wide table view: a `day` column followed by one column per distinct
    /// employee, in header order. An employee literally named `day` gets the
    /// column `day (employee)`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.employees.len() + 1);
        let days: Vec<i64> = self.day_numbers();
        columns.push(Series::new(PlSmallStr::from_static(DAY_COLUMN), days).into_column());

        let mut seen = HashSet::new();
        for name in &self.employees {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let values: Vec<Option<&str>> = self
                .days
                .iter()
                .map(|record| record.shift_of(name))
                .collect();
            let column_name = if name == DAY_COLUMN {
                format!("{name} (employee)")
            } else {
                name.clone()
            };
            columns.push(Series::new(column_name.into(), values).into_column());
        }

        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shifts(pairs: &[(&str, &str)]) -> Shifts {
        pairs
            .iter()
            .map(|(name, code)| (name.to_string(), code.to_string()))
            .collect()
    }

    fn sample() -> Schedule {
        Schedule::new(
            vec!["Alice".into(), "Bob".into()],
            vec![
                DayRecord::new(1, shifts(&[("Alice", "Д"), ("Bob", "В")])),
                DayRecord::new(2, shifts(&[("Alice", "В"), ("Bob", "Д")])),
                DayRecord::new(3, shifts(&[("Alice", "Р"), ("Bob", "Р")])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn construction_requires_names_and_days() {
        assert_eq!(
            Schedule::new(Vec::new(), vec![DayRecord::new(1, Shifts::new())]),
            Err(ScheduleError::Empty {
                employees: 0,
                days: 1
            })
        );
        assert_eq!(
            Schedule::new(vec!["Alice".into()], Vec::new()),
            Err(ScheduleError::Empty {
                employees: 1,
                days: 0
            })
        );
    }

    #[test]
    fn swap_within_the_same_day() {
        let mut s = sample();
        assert!(s.swap_shifts(1, 1, "Alice", "Bob"));
        let day = s.get_day_schedule(1).unwrap();
        assert_eq!(day["Alice"], "В");
        assert_eq!(day["Bob"], "Д");
    }

    #[test]
    fn swap_with_unknown_employee_is_a_no_op() {
        let mut s = sample();
        let before = s.clone();
        assert!(!s.swap_shifts(1, 2, "Alice", "Carol"));
        assert!(!s.swap_shifts(1, 9, "Alice", "Bob"));
        assert_eq!(s, before);
    }

    #[test]
    fn change_status_stores_surface_letter() {
        let mut s = sample();
        assert!(s.change_status(3, "Bob", "duty"));
        assert_eq!(s.get_day_schedule(3).unwrap()["Bob"], "Д");
        assert!(!s.change_status(3, "Bob", "X"));
        assert!(!s.change_status(4, "Bob", "Д"));
        assert!(!s.change_status(3, "Nobody", "Д"));
        assert_eq!(s.get_day_schedule(3).unwrap()["Bob"], "Д");
    }

    #[test]
    fn employees_with_filters_by_code() {
        let s = sample();
        assert_eq!(s.employees_with(2, ShiftCode::Duty), Some(vec!["Bob"]));
        assert_eq!(s.employees_with(3, ShiftCode::Work), Some(vec!["Alice", "Bob"]));
        assert_eq!(s.employees_with(3, ShiftCode::Leave), Some(Vec::new()));
        assert_eq!(s.employees_with(30, ShiftCode::Duty), None);
    }

    #[test]
    fn dataframe_has_day_and_employee_columns() {
        let df = sample().to_dataframe().unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
        let bob = df.column("Bob").unwrap().str().unwrap();
        assert_eq!(bob.get(1), Some("Д"));
        let day = df.column("day").unwrap().i64().unwrap();
        assert_eq!(day.get(2), Some(3));
    }

    #[test]
    fn employee_named_day_keeps_its_own_column() {
        let s = Schedule::new(
            vec!["day".into(), "Bob".into()],
            vec![DayRecord::new(1, shifts(&[("day", "Д"), ("Bob", "В")]))],
        )
        .unwrap();
        let df = s.to_dataframe().unwrap();
        assert_eq!(df.width(), 3);
        assert_eq!(df.column("day").unwrap().i64().unwrap().get(0), Some(1));
        let employee = df.column("day (employee)").unwrap().str().unwrap();
        assert_eq!(employee.get(0), Some("Д"));
    }
}
