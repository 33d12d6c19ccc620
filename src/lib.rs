pub mod config;
pub mod grid;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod import;
pub mod period;
pub mod persistence;
pub mod schedule;
pub mod shift;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use grid::{
    Anchor, Cell, ColumnSpan, ExtractionError, Grid, GridLoadError, GridLocation, RosterError,
    build, extract_roster, load_grid, locate,
};
pub use import::{ImportSummary, import_roster_file, read_roster_file};
pub use period::{Period, PeriodError, extract_period, find_current_roster_file, find_roster_file};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteRosterStore;
pub use persistence::{
    PersistenceError, RosterStore, load_roster_from_csv, load_roster_from_json,
    save_roster_to_csv, save_roster_to_json, validate_schedule,
};
pub use schedule::{DayRecord, Schedule, ScheduleError, Shifts};
pub use shift::{ShiftCode, UnknownShiftCode};
