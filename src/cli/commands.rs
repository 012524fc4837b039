//! CLI command implementations
//!
//! `serve` boots the HTTP server on a tokio runtime. The remaining commands
//! open the database, run one facade operation, print the result and exit.

use std::sync::Arc;

use crate::config::Config;
use crate::db::ConnectionProvider;
use crate::facade::DatabaseFacade;
use crate::http_server::HttpServer;
use crate::observability::{init_tracing, COMMAND_DIRECTIVE, SERVE_DIRECTIVE};
use crate::query::RawParams;

use super::args::{Command, ConnectArgs, OutputArgs};
use super::errors::{CliError, CliResult};
use super::io::write_output;

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();

    let directive = match cli.command {
        Command::Serve { .. } => SERVE_DIRECTIVE,
        _ => COMMAND_DIRECTIVE,
    };
    init_tracing(directive)
        .map_err(|e| CliError::io_error(format!("Failed to initialize logging: {}", e)))?;

    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            connect,
            host,
            port,
        } => serve(&connect, host, port),
        Command::Tables { connect, output } => tables(&connect, &output),
        Command::Schema {
            table,
            connect,
            output,
        } => schema(&connect, &output, &table),
        Command::Query {
            table,
            params,
            connect,
            output,
        } => query(&connect, &output, &table, &params),
        Command::Sql {
            statement,
            connect,
            output,
        } => sql(&connect, &output, &statement),
    }
}

/// Start the HTTP server and block until shutdown
pub fn serve(connect: &ConnectArgs, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(connect)?;
    if let Some(host) = host {
        config.http.host = host;
    }
    if let Some(port) = port {
        config.http.port = port;
    }

    let facade = open_facade(&config)?;
    let server = HttpServer::new(config.http.clone(), facade);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::io_error(format!("HTTP server failed: {}", e)))
    })
}

/// List tables
pub fn tables(connect: &ConnectArgs, output: &OutputArgs) -> CliResult<()> {
    let facade = open_facade(&load_config(connect)?)?;
    let tables = facade.list_tables()?;
    write_output(&tables, output.format)
}

/// Show one table's column schema
pub fn schema(connect: &ConnectArgs, output: &OutputArgs, table: &str) -> CliResult<()> {
    let facade = open_facade(&load_config(connect)?)?;
    let schema = facade.table_schema(table)?;
    write_output(&schema, output.format)
}

/// Run a validated dynamic query
pub fn query(
    connect: &ConnectArgs,
    output: &OutputArgs,
    table: &str,
    params: &[String],
) -> CliResult<()> {
    let params = parse_params(params)?;
    let facade = open_facade(&load_config(connect)?)?;
    let rows = facade.query_table(table, &params)?;
    write_output(&rows, output.format)
}

/// Execute a raw statement
pub fn sql(connect: &ConnectArgs, output: &OutputArgs, statement: &str) -> CliResult<()> {
    let facade = open_facade(&load_config(connect)?)?;
    let outcome = facade.execute_sql(statement)?;
    write_output(&outcome, output.format)
}

/// Load the config file and apply the `--database` override
fn load_config(connect: &ConnectArgs) -> CliResult<Config> {
    let mut config = Config::resolve(connect.config.as_deref())?;
    if let Some(path) = &connect.database {
        config.database.path = path.clone();
    }
    config.validate()?;
    Ok(config)
}

fn open_facade(config: &Config) -> CliResult<DatabaseFacade> {
    let provider = ConnectionProvider::open(&config.database)?;
    tracing::debug!(path = %provider.path().display(), "database opened");
    Ok(DatabaseFacade::new(Arc::new(provider)))
}

/// Parse `key=value` arguments into request parameters.
///
/// The value may be empty; the key may not.
pub fn parse_params(args: &[String]) -> CliResult<RawParams> {
    let mut params = RawParams::new();
    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) if !key.is_empty() => params.insert(key, value),
            _ => {
                return Err(CliError::invalid_argument(format!(
                    "Invalid parameter '{}'. Expected key=value.",
                    arg
                )))
            }
        }
    }
    Ok(params)
}
