//! Runtime configuration for front ends.
//!
//! # Invariants
//! - `data_dir` is absolute; database and log locations derive from it.
//! - `log_level` is one of the levels accepted by `init_logging`.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "tripcheck.sqlite3";
pub const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeDataDir(PathBuf),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeDataDir(path) => {
                write!(f, "data dir must be an absolute path, got `{}`", path.display())
            }
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    data_dir: PathBuf,
    log_level: &'static str,
}

impl AppConfig {
    /// Builds a config with the build-mode default log level.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let data_dir = data_dir.into();
        if !data_dir.is_absolute() {
            return Err(ConfigError::RelativeDataDir(data_dir));
        }
        Ok(Self {
            data_dir,
            log_level: default_log_level(),
        })
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, ConfigError> {
        self.log_level = normalize_level(level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(self)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_level(&self) -> &'static str {
        self.log_level
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use std::path::PathBuf;

    #[test]
    fn derives_paths_from_data_dir() {
        let base = std::env::temp_dir().join("tripcheck-config");
        let config = AppConfig::new(&base).unwrap();
        assert_eq!(config.db_path(), base.join("tripcheck.sqlite3"));
        assert_eq!(config.log_dir(), base.join("logs"));
    }

    #[test]
    fn rejects_relative_data_dir() {
        let err = AppConfig::new("relative/dir").unwrap_err();
        assert_eq!(err, ConfigError::RelativeDataDir(PathBuf::from("relative/dir")));
    }

    #[test]
    fn normalizes_log_level() {
        let config = AppConfig::new(std::env::temp_dir())
            .unwrap()
            .with_log_level(" WARNING ")
            .unwrap();
        assert_eq!(config.log_level(), "warn");
        assert!(AppConfig::new(std::env::temp_dir())
            .unwrap()
            .with_log_level("loud")
            .is_err());
    }
}
