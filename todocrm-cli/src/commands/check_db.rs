//! Connectivity check against the configured store

use anyhow::{Context, Result};
use clap::Parser;
use todocrm_core::EntityKind;

use super::DbArgs;

#[derive(Parser, Debug)]
pub struct CheckDbArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Connect once and print per-collection record counts.
pub async fn run_check_db(args: CheckDbArgs) -> Result<()> {
    let db = args.db.open()?;
    let store = db
        .connect()
        .await
        .context("Failed to connect to the document store")?;

    println!("Connected to document store");
    for kind in [EntityKind::Todo, EntityKind::Contact] {
        let count = store
            .count(kind.collection())
            .await
            .with_context(|| format!("Failed to count {}", kind.collection()))?;
        println!("  {}: {}", kind.collection(), count);
    }

    Ok(())
}
