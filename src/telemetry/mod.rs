//! Logging setup for Sahayak
//!
//! Structured `tracing` events go to stderr. `RUST_LOG` wins over the
//! verbosity flags when set.

use crate::cli::Verbosity;
use tracing_subscriber::EnvFilter;

/// Build the filter: RUST_LOG if present, else the verbosity default
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()))
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
