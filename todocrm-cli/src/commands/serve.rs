//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use todocrm_server::{run_server, ServerConfig};

use super::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server until Ctrl+C / SIGTERM
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db = args.db.open()?;

    tracing::info!("Starting todocrm server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(db, config).await.context("Server error")?;

    Ok(())
}
