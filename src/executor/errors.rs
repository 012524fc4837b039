//! Executor errors

use thiserror::Error;

pub type ExecResult<T> = Result<T, ExecError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    /// The driver rejected or failed the statement; message is verbatim
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The text holds no statement (blank or comments only)
    #[error("No SQL statement to execute")]
    EmptyStatement,
}

impl From<rusqlite::Error> for ExecError {
    fn from(e: rusqlite::Error) -> Self {
        ExecError::ExecutionFailed(e.to_string())
    }
}
