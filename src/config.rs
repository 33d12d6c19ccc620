use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "DUTY_ROSTER_CONFIG";
pub const ROSTER_DIR_VAR: &str = "DUTY_ROSTER_DIR";
pub const DATABASE_VAR: &str = "DUTY_ROSTER_DB";
pub const HTTP_ADDR_VAR: &str = "DUTY_ROSTER_HTTP_ADDR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory searched for the current month's roster workbook.
    pub roster_dir: PathBuf,
    pub database_path: PathBuf,
    pub http_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster_dir: PathBuf::from("."),
            database_path: PathBuf::from("roster.db"),
            http_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// TOML file named by `DUTY_ROSTER_CONFIG` (if set), then individual
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ROSTER_DIR_VAR) {
            self.roster_dir = PathBuf::from(dir);
        }
        if let Some(db) = lookup(DATABASE_VAR) {
            self.database_path = PathBuf::from(db);
        }
        if let Some(addr) = lookup(HTTP_ADDR_VAR) {
            self.http_addr = addr;
        }
        self
    }
}
