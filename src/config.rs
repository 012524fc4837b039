//! Service configuration
//!
//! Loaded from a JSON file; every field has a default so a missing or
//! partial file still yields a usable configuration. CLI flags (and their
//! environment fallbacks) are applied on top by the `cli` module.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "./sqlgate.json";

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub http: HttpServerConfig,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (default: "sqlgate.db")
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    /// Open connections read-only (default: false)
    #[serde(default)]
    pub read_only: bool,

    /// How long a connection waits on a locked database, in seconds (default: 30)
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("sqlgate.db")
}

fn default_busy_timeout() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            read_only: false,
            busy_timeout_secs: default_busy_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Config pointing at a specific database file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

impl Config {
    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a command.
    ///
    /// An explicitly requested file must exist. Without one, the default
    /// path is used when present and built-in defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> ConfigResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate field values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        if self.database.busy_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "database.busy_timeout_secs must be > 0".into(),
            ));
        }

        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Invalid("http.host must not be empty".into()));
        }

        Ok(())
    }
}
