//! Tracing setup for the todocrm CLI
//!
//! Usage:
//!   todocrm --debug ...                   # Debug logging to stderr
//!   RUST_LOG=todocrm_core=trace todocrm   # Fine-grained log control
//!
//! Logs always go to stderr; stdout carries command output only.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Default filters when `RUST_LOG` is unset
const INFO_FILTER: &str = "info,sqlx=warn";
const DEBUG_FILTER: &str = "debug,sqlx=info,hyper=info";

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Raise the default level to debug (ignored when RUST_LOG is set)
    pub debug: bool,
}

/// Initialize console tracing. Fails if a subscriber is already installed.
pub fn init(config: &TracingConfig) -> Result<()> {
    let fallback = if config.debug { DEBUG_FILTER } else { INFO_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
