//! Logging setup
//!
//! Installs the global `tracing` subscriber. Filtering follows `RUST_LOG`
//! when set and the caller's default directive otherwise. `LOG_FORMAT=json`
//! switches to one JSON object per line. Output always goes to stderr so
//! command output on stdout stays machine-readable.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for the HTTP server
pub const SERVE_DIRECTIVE: &str = "sqlgate=info,tower_http=info";

/// Default filter for one-shot commands
pub const COMMAND_DIRECTIVE: &str = "sqlgate=warn";

/// Initialize the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(default_directive: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(filter);

    if json_requested() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    }
}

fn json_requested() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
