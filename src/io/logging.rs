//! Structured logging to stderr
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the level chosen
//! on the command line.

use crate::io::error::{Result, WfcError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter when progress bars are shown
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default filter in quiet mode
pub const QUIET_LOG_LEVEL: &str = "warn";

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_logging(default_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| WfcError::Logging {
            reason: e.to_string(),
        })
}
