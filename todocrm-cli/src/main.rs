//! todocrm CLI - todo list and contact CRM
//!
//! Entry point for the `todocrm` command-line tool:
//! - `serve`: JSON API over HTTP
//! - `check-db`: verify the document store is reachable
//! - `todos` / `contacts`: run the data-access operations directly

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "todocrm",
    author,
    version,
    about = "Todo list and contact CRM backed by a document store",
    long_about = "Manage todos and contacts from the command line, or serve them as a JSON API. \
                  The store is chosen by DATABASE_URL (postgres://... or memory://)."
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Connect to the document store once and report the result
    CheckDb(commands::check_db::CheckDbArgs),
    /// Create, list, update and delete todos
    Todos(commands::todos::TodosArgs),
    /// Create, list, update and delete contacts
    Contacts(commands::contacts::ContactsArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // A missing .env is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::CheckDb(args) => commands::run_check_db(args).await?,
        Commands::Todos(args) => return commands::run_todos(args).await,
        Commands::Contacts(args) => return commands::run_contacts(args).await,
    }

    Ok(ExitCode::SUCCESS)
}
