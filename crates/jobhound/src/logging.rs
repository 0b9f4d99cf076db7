//! Global logging setup: bridges `log` records into `tracing` and installs
//! a formatted subscriber with `RUST_LOG`-style filtering.

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to install log bridge: {0}")]
    Bridge(#[from] log::SetLoggerError),

    #[error("Failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Installs the global subscriber. `default_filter` is used when `RUST_LOG`
/// is unset (e.g. `"info"` or `"jobhound=debug"`).
///
/// Fails if a global logger or subscriber is already installed, so call it
/// once at startup.
pub fn try_init(default_filter: &str) -> Result<(), LoggingError> {
    LogTracer::init()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = fmt::Subscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Like [`try_init`] but ignores the already-installed error, for hosts that
/// manage their own subscriber.
pub fn init(default_filter: &str) {
    let _ = try_init(default_filter);
}
