//! Tracing subscriber setup for the binary.

use tracing_subscriber::{fmt, EnvFilter};

use terracut_core::{Error, Result};

/// Install the global subscriber.
///
/// `RUST_LOG` overrides `default_filter` when set.
pub fn init_logging(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::internal(format!("failed to install logger: {e}")))
}
