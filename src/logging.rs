//! Logging initialization
//!
//! Diagnostics go to stderr so stdout carries only the catalog output.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
