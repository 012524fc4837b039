//! # Query Executor
//!
//! Runs compiled statements (and, separately, raw SQL) on a session.
//! Rows come back as ordered column → value objects.

mod errors;
mod executor;
mod raw;
mod result;

pub use errors::{ExecError, ExecResult};
pub use executor::Executor;
pub use result::{ExecOutcome, Row, NO_ROWS_MESSAGE};
