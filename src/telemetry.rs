//! Tracing subscriber bootstrap for binaries embedding the crate.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Error raised when a global subscriber cannot be installed.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback directive did not parse.
    #[error("invalid log directive: {0}")]
    Directive(#[from] tracing_subscriber::filter::ParseError),

    /// Another global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs a formatted subscriber filtered by `RUST_LOG`.
///
/// `default_directive` (for example `opentask=info`) applies when `RUST_LOG`
/// is unset or invalid.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the directive is malformed or a global
/// subscriber already exists.
pub fn init_tracing(default_directive: &str) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;
    Ok(())
}
