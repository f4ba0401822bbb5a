//! Tracing setup for presentation shells
//!
//! Installs a global `tracing-subscriber` fmt subscriber. `RUST_LOG` wins
//! over the default filter passed in. Installation happens at most once per
//! process; later calls are no-ops.

use tracing_subscriber::EnvFilter;

/// Install a human-readable subscriber.
///
/// Returns `true` if this call installed it.
pub fn init_tracing(default_filter: &str) -> bool {
    tracing_subscriber::fmt().with_env_filter(env_filter(default_filter)).try_init().is_ok()
}

/// Install a newline-delimited JSON subscriber.
///
/// Returns `true` if this call installed it.
pub fn init_json_tracing(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(default_filter))
        .try_init()
        .is_ok()
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
