use super::{PersistenceResult, RosterStore};
use crate::period::Period;
use crate::schedule::{DayRecord, Schedule, Shifts};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use std::sync::Mutex;

/// Roster storage keyed by (year, month, day, employee).
pub struct SqliteRosterStore {
    connection: Mutex<Connection>,
}

impl SqliteRosterStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            PRAGMA foreign_keys = ON;
            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS shifts (
                id INTEGER PRIMARY KEY,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                day INTEGER NOT NULL,
                employee_id INTEGER NOT NULL REFERENCES employees(id),
                shift TEXT NOT NULL,
                UNIQUE (year, month, day, employee_id)
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn employee_id(tx: &Transaction, name: &str) -> PersistenceResult<i64> {
        tx.execute(
            "INSERT OR IGNORE INTO employees (name) VALUES (?1)",
            params![name],
        )?;
        let id = tx.query_row(
            "SELECT id FROM employees WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn save_shifts(tx: &Transaction, period: Period, schedule: &Schedule) -> PersistenceResult<()> {
        tx.execute(
            "DELETE FROM shifts WHERE year = ?1 AND month = ?2",
            params![period.year, period.month],
        )?;

        let mut ids = Vec::with_capacity(schedule.employees().len());
        for name in schedule.employees() {
            if ids.iter().any(|(known, _): &(&str, i64)| *known == name.as_str()) {
                continue;
            }
            ids.push((name.as_str(), Self::employee_id(tx, name)?));
        }

        let mut stmt = tx.prepare(
            "INSERT INTO shifts (year, month, day, employee_id, shift) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for record in schedule.get_full_schedule() {
            for (name, employee_id) in &ids {
                let shift = record.shift_of(name).unwrap_or_default();
                stmt.execute(params![period.year, period.month, record.day, employee_id, shift])?;
            }
        }
        Ok(())
    }
}

impl RosterStore for SqliteRosterStore {
    fn save_roster(&self, period: Period, schedule: &Schedule) -> PersistenceResult<()> {
        super::validate_schedule(schedule)?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        Self::save_shifts(&tx, period, schedule)?;
        tx.commit()?;
        tracing::info!(
            %period,
            days = schedule.get_full_schedule().len(),
            employees = schedule.employees().len(),
            "stored roster"
        );
        Ok(())
    }

    fn load_roster(&self, period: Period) -> PersistenceResult<Option<Schedule>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let mut stmt = conn.prepare(
            "SELECT s.day, e.name, s.shift FROM shifts s \
             JOIN employees e ON e.id = s.employee_id \
             WHERE s.year = ?1 AND s.month = ?2 ORDER BY s.day ASC, s.id ASC",
        )?;
        let rows = stmt.query_map(params![period.year, period.month], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut employees: Vec<String> = Vec::new();
        let mut days: Vec<DayRecord> = Vec::new();
        for row in rows {
            let (day, name, shift) = row?;
            if !employees.contains(&name) {
                employees.push(name.clone());
            }
            match days.last_mut() {
                Some(record) if record.day == day => {
                    record.shifts.insert(name, shift);
                }
                _ => {
                    let mut shifts = Shifts::new();
                    shifts.insert(name, shift);
                    days.push(DayRecord::new(day, shifts));
                }
            }
        }

        if days.is_empty() {
            return Ok(None);
        }
        Ok(Some(Schedule::new(employees, days)?))
    }

    fn employees(&self) -> PersistenceResult<Vec<String>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare("SELECT name FROM employees ORDER BY name ASC")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl SqliteRosterStore {
    /// Stored shift for one employee on one day, if any.
    pub fn shift_for(
        &self,
        period: Period,
        day: i64,
        employee: &str,
    ) -> PersistenceResult<Option<String>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let shift = conn
            .query_row(
                "SELECT s.shift FROM shifts s JOIN employees e ON e.id = s.employee_id \
                 WHERE s.year = ?1 AND s.month = ?2 AND s.day = ?3 AND e.name = ?4",
                params![period.year, period.month, day, employee],
                |row| row.get(0),
            )
            .optional()?;
        Ok(shift)
    }
}
