//! CLI-specific error types
//!
//! Every CLI error is fatal: `main` prints it and exits non-zero.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::db::DbError;
use crate::facade::FacadeError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, runtime, socket)
    IoError,
    /// Malformed command arguments
    InvalidArgument,
    /// Database could not be opened
    DatabaseUnavailable,
    /// Request rejected as invalid
    InvalidRequest,
    /// Table or schema missing
    NotFound,
    /// Statement failed in the database
    QueryFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SQLGATE_CLI_CONFIG_ERROR",
            Self::IoError => "SQLGATE_CLI_IO_ERROR",
            Self::InvalidArgument => "SQLGATE_CLI_INVALID_ARGUMENT",
            Self::DatabaseUnavailable => "SQLGATE_CLI_DATABASE_UNAVAILABLE",
            Self::InvalidRequest => "SQLGATE_CLI_INVALID_REQUEST",
            Self::NotFound => "SQLGATE_CLI_NOT_FOUND",
            Self::QueryFailed => "SQLGATE_CLI_QUERY_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Malformed argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<DbError> for CliError {
    fn from(e: DbError) -> Self {
        Self::new(CliErrorCode::DatabaseUnavailable, e.to_string())
    }
}

impl From<FacadeError> for CliError {
    fn from(e: FacadeError) -> Self {
        use crate::query::QueryError;

        let code = match &e {
            FacadeError::Query(QueryError::TableNotFound(_)) | FacadeError::SchemaNotFound(_) => {
                CliErrorCode::NotFound
            }
            FacadeError::Unavailable(_) => CliErrorCode::DatabaseUnavailable,
            err if err.is_client_error() => CliErrorCode::InvalidRequest,
            _ => CliErrorCode::QueryFailed,
        };
        Self::new(code, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
