//! CLI argument definitions using clap
//!
//! Commands:
//! - sqlgate serve [--config <path>] [--database <path>] [--host <h>] [--port <n>]
//! - sqlgate tables
//! - sqlgate schema <table>
//! - sqlgate query <table> [key=value]...
//! - sqlgate sql <statement>

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sqlgate - relational tables over HTTP
#[derive(Parser, Debug)]
#[command(name = "sqlgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where to find the database
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectArgs {
    /// Path to configuration file (default: ./sqlgate.json when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database, overrides the config file
    #[arg(long, env = "SQLGATE_DATABASE")]
    pub database: Option<PathBuf>,
}

/// Output rendering for one-shot commands
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented JSON
    #[default]
    Json,
    /// Aligned text table
    Table,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        connect: ConnectArgs,

        /// Host to bind to, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overrides the config file
        #[arg(long, env = "SQLGATE_PORT")]
        port: Option<u16>,
    },

    /// List tables
    Tables {
        #[command(flatten)]
        connect: ConnectArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the column schema of a table
    Schema {
        /// Table name
        table: String,

        #[command(flatten)]
        connect: ConnectArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run a validated query against a table
    Query {
        /// Table name
        table: String,

        /// Query parameters as key=value (columns, order_by, limit, offset, or a column filter)
        params: Vec<String>,

        #[command(flatten)]
        connect: ConnectArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Execute a raw SQL statement
    Sql {
        /// SQL statement
        statement: String,

        #[command(flatten)]
        connect: ConnectArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query_with_params() {
        let cli = Cli::try_parse_from([
            "sqlgate",
            "query",
            "users",
            "status=active",
            "limit=10",
            "--format",
            "table",
        ])
        .unwrap();

        match cli.command {
            Command::Query {
                table,
                params,
                output,
                ..
            } => {
                assert_eq!(table, "users");
                assert_eq!(params, vec!["status=active", "limit=10"]);
                assert_eq!(output.format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "sqlgate",
            "serve",
            "--database",
            "app.db",
            "--port",
            "9000",
        ])
        .unwrap();

        match cli.command {
            Command::Serve { connect, port, .. } => {
                assert_eq!(connect.database, Some(PathBuf::from("app.db")));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
