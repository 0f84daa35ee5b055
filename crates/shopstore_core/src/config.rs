//! Runtime configuration for embedding the store core.
//!
//! # Invariants
//! - The core reads no environment variables; callers build `CoreConfig`.
//! - `validate()` runs before any file or connection is opened.

use crate::db::{open_db_in_memory, open_db_with_timeout, DbError};
use crate::logging::{self, default_log_level, LoggingError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyDatabasePath,
    ZeroBusyTimeout,
    Logging(LoggingError),
    Db(DbError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDatabasePath => write!(f, "database path cannot be empty"),
            Self::ZeroBusyTimeout => write!(f, "busy timeout must be greater than zero"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::EmptyDatabasePath | Self::ZeroBusyTimeout => None,
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for ConfigError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Database and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub database: DatabaseLocation,
    pub log_level: String,
    /// File logging is only started when a directory is set.
    pub log_dir: Option<PathBuf>,
    pub busy_timeout: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database: DatabaseLocation::Memory,
            log_level: default_log_level().to_string(),
            log_dir: None,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl CoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            database: DatabaseLocation::File(path.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let DatabaseLocation::File(path) = &self.database {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyDatabasePath);
            }
        }
        if self.busy_timeout.is_zero() {
            return Err(ConfigError::ZeroBusyTimeout);
        }
        logging::normalize_level(&self.log_level)?;
        if let Some(dir) = &self.log_dir {
            logging::normalize_log_dir(dir)?;
        }
        Ok(())
    }

    /// Opens the configured database with migrations applied.
    pub fn open_database(&self) -> Result<Connection, ConfigError> {
        self.validate()?;
        let conn = match &self.database {
            DatabaseLocation::Memory => open_db_in_memory()?,
            DatabaseLocation::File(path) => open_db_with_timeout(path, self.busy_timeout)?,
        };
        Ok(conn)
    }

    /// Starts file logging when `log_dir` is set; returns whether it did.
    pub fn init_logging(&self) -> Result<bool, ConfigError> {
        match &self.log_dir {
            Some(dir) => {
                logging::init_logging(&self.log_level, dir)?;
                Ok(true)
            }
            None => {
                logging::normalize_level(&self.log_level)?;
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DatabaseLocation};
    use crate::logging::LoggingError;
    use std::time::Duration;

    #[test]
    fn default_config_is_in_memory_and_valid() {
        let config = CoreConfig::default();

        assert_eq!(config.database, DatabaseLocation::Memory);
        assert!(config.log_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_settings() {
        let empty_path = CoreConfig::with_file("");
        assert!(matches!(
            empty_path.validate(),
            Err(ConfigError::EmptyDatabasePath)
        ));

        let zero_timeout = CoreConfig {
            busy_timeout: Duration::ZERO,
            ..CoreConfig::default()
        };
        assert!(matches!(
            zero_timeout.validate(),
            Err(ConfigError::ZeroBusyTimeout)
        ));

        let bad_level = CoreConfig {
            log_level: "loud".to_string(),
            ..CoreConfig::default()
        };
        assert!(matches!(
            bad_level.validate(),
            Err(ConfigError::Logging(LoggingError::UnsupportedLevel(_)))
        ));

        let relative_dir = CoreConfig {
            log_dir: Some("logs".into()),
            ..CoreConfig::default()
        };
        assert!(matches!(
            relative_dir.validate(),
            Err(ConfigError::Logging(LoggingError::RelativeDir(_)))
        ));
    }

    #[test]
    fn init_logging_without_dir_is_skipped() {
        assert!(!CoreConfig::default().init_logging().unwrap());
    }

    #[test]
    fn file_database_is_opened_with_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::with_file(dir.path().join("shop.sqlite3"));

        let conn = config.open_database().unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, crate::db::migrations::latest_version());
    }
}
