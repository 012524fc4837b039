//! CLI module for sqlgate
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP API
//! - tables / schema: Catalog inspection
//! - query: One-shot validated query
//! - sql: One-shot raw statement

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ConnectArgs, OutputArgs, OutputFormat};
pub use commands::{parse_params, query, run, run_command, schema, serve, sql, tables};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{render, write_output, EMPTY_RESULT};
