//! Logging infrastructure for worldswitch
//!
//! Provides unified logging setup using the tracing ecosystem. Both
//! binaries log to stderr; the filter comes from the environment.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{Result, WorldSwitchError};

/// Environment variable consulted for the log filter
pub const LOG_ENV: &str = "WORLDSWITCH_LOG";

/// Initialize logging to stderr
///
/// The filter is taken from `WORLDSWITCH_LOG` (e.g. "debug", or
/// "worldswitch_server=debug,tokio=warn"), defaulting to `info`.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| WorldSwitchError::internal(format!("failed to init logging: {e}")))
}
