//! Command implementations for the todocrm CLI

pub mod check_db;
pub mod contacts;
pub mod serve;
pub mod todos;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use todocrm_core::config::DATABASE_URL_VAR;
use todocrm_core::{Database, Envelope, StoreConfig};
use todocrm_server::DocumentConnector;

// Re-export dispatcher functions for flat access from main.rs
pub use check_db::run_check_db;
pub use contacts::run_contacts;
pub use serve::run_serve;
pub use todos::run_todos;

/// Store selection shared by every command that touches data
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Store connection string (postgres://... or memory://)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl DbArgs {
    /// Validate the connection string and build a lazily connected database.
    pub fn open(self) -> Result<Database> {
        // --database-url wins over the environment (clap already folds in DATABASE_URL)
        let config = StoreConfig::from_lookup(|key| match key {
            DATABASE_URL_VAR => self.database_url.clone(),
            _ => std::env::var(key).ok(),
        })
        .context("Invalid store configuration")?;
        tracing::debug!(context = ?config.context(), "store configuration loaded");
        Ok(Database::new(&config, Arc::new(DocumentConnector::new())))
    }
}

/// Print an operation envelope as pretty JSON; failure maps to exit status 1.
pub fn print_envelope<T: Serialize>(env: &Envelope<T>) -> Result<ExitCode> {
    let json = serde_json::to_string_pretty(env).context("Failed to serialize result")?;
    println!("{json}");
    Ok(if env.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
