//! Tracing subscriber setup for binaries and services embedding the
//! pipeline. Library code only emits events; it never installs a
//! subscriber on its own.

use tracing_subscriber::EnvFilter;

use crate::config::defaults;

/// Install the global subscriber: structured JSON lines, filtered by the
/// `RISKLINE_LOG` environment variable (`info` when unset).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("RISKLINE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .init();
}

/// Same, but with an explicit filter string. Panics if a subscriber is
/// already installed, so tests that need one share a single call.
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .init();
}
