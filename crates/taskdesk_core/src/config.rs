//! Explicit runtime configuration for storage and logging.
//!
//! # Invariants
//! - No process-wide default database exists; callers pass a `StoreConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name suggested to binaries that need a default database location.
pub const DEFAULT_DB_FILE_NAME: &str = "tasks.db";

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Location and connection settings of the SQLite store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    /// How long a connection waits on a locked database file.
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }
}

/// Settings for the rolling file logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// One of `trace|debug|info|warn|error`, case-insensitive.
    pub level: String,
    /// Absolute directory receiving the log files.
    pub log_dir: PathBuf,
}

impl LogConfig {
    pub fn new(level: impl Into<String>, log_dir: impl AsRef<Path>) -> Self {
        Self {
            level: level.into(),
            log_dir: log_dir.as_ref().to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_DB_FILE_NAME};
    use std::time::Duration;

    #[test]
    fn store_config_defaults_busy_timeout() {
        let config = StoreConfig::new(DEFAULT_DB_FILE_NAME);
        assert_eq!(config.db_path.to_str(), Some("tasks.db"));
        assert_eq!(config.busy_timeout, Duration::from_secs(5));

        let tuned = config.with_busy_timeout(Duration::from_millis(250));
        assert_eq!(tuned.busy_timeout, Duration::from_millis(250));
    }
}
