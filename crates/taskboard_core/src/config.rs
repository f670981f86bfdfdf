//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Choose the storage backend once at startup.
//! - Resolve storage locations and logging settings with stable defaults.
//!
//! # Invariants
//! - Values are trimmed before use.
//! - A variable that is set but blank is rejected, not defaulted.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const STORAGE_ENV: &str = "TASKBOARD_STORAGE";
pub const DB_PATH_ENV: &str = "TASKBOARD_DB_PATH";
pub const DATA_DIR_ENV: &str = "TASKBOARD_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "TASKBOARD_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TASKBOARD_LOG_DIR";

const DEFAULT_DB_PATH: &str = "taskmanagement.db";
const DEFAULT_DATA_DIR: &str = "Data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedBackend(String),
    EmptyValue(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedBackend(value) => write!(
                f,
                "unsupported storage backend `{value}`; expected sqlite|json"
            ),
            Self::EmptyValue(name) => write!(f, "{name} is set but empty"),
        }
    }
}

impl Error for ConfigError {}

/// Storage backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Relational store in a single SQLite file.
    Sqlite { path: PathBuf },
    /// Flat-file store with one JSON document per collection.
    Json { directory: PathBuf },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub log_level: String,
    /// File logging is only started when a directory is configured.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which returns a variable's raw
    /// value or `None` when unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = read_value(&lookup, STORAGE_ENV)?
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_else(|| "sqlite".to_string());

        let storage = match backend.as_str() {
            "sqlite" => StorageConfig::Sqlite {
                path: read_value(&lookup, DB_PATH_ENV)?
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            },
            "json" => StorageConfig::Json {
                directory: read_value(&lookup, DATA_DIR_ENV)?
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            },
            _ => return Err(ConfigError::UnsupportedBackend(backend)),
        };

        let log_level = read_value(&lookup, LOG_LEVEL_ENV)?
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = read_value(&lookup, LOG_DIR_ENV)?.map(PathBuf::from);

        Ok(Self {
            storage,
            log_level,
            log_dir,
        })
    }
}

fn read_value(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<String>, ConfigError> {
    match lookup(name) {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(ConfigError::EmptyValue(name))
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, StorageConfig};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_sqlite_file_in_working_directory() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.storage, StorageConfig::default());
        assert!(config.log_dir.is_none());
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn json_backend_uses_data_dir() {
        let config = config_from(&[
            ("TASKBOARD_STORAGE", " JSON "),
            ("TASKBOARD_DATA_DIR", "/var/lib/taskboard"),
        ])
        .unwrap();
        assert_eq!(
            config.storage,
            StorageConfig::Json {
                directory: PathBuf::from("/var/lib/taskboard")
            }
        );
    }

    #[test]
    fn sqlite_path_and_logging_are_read() {
        let config = config_from(&[
            ("TASKBOARD_DB_PATH", "/tmp/board.db"),
            ("TASKBOARD_LOG_LEVEL", "warn"),
            ("TASKBOARD_LOG_DIR", "/tmp/logs"),
        ])
        .unwrap();
        assert_eq!(
            config.storage,
            StorageConfig::Sqlite {
                path: PathBuf::from("/tmp/board.db")
            }
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let error = config_from(&[("TASKBOARD_STORAGE", "postgres")]).unwrap_err();
        assert_eq!(
            error,
            ConfigError::UnsupportedBackend("postgres".to_string())
        );
    }

    #[test]
    fn blank_value_is_rejected() {
        let error = config_from(&[("TASKBOARD_DB_PATH", "   ")]).unwrap_err();
        assert_eq!(error, ConfigError::EmptyValue("TASKBOARD_DB_PATH"));
    }
}
