//! Logging Initialization
//!
//! Library code logs through the `log` facade. The binary installs a
//! `tracing-subscriber` fmt subscriber on stderr, which also captures `log`
//! records, so stdout stays free for query output.

use std::io;

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "info";

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this twice is
/// harmless; the second call reports the failure on stderr and keeps the first
/// subscriber.
pub fn init(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

/// Pick the default level from a verbosity flag and an optional configured level.
pub fn level_for(verbose: bool, configured: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    configured.unwrap_or(DEFAULT_LEVEL).to_string()
}
