//! Connection-string dispatch to a store backend
//!
//! - `memory://` → in-process store
//! - `postgres://`, `postgresql://` → PostgreSQL pool, migrated on connect

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use todocrm_core::store::{scheme_of, MemoryConnector};
use todocrm_core::{Connector, Store, StoreError};

use crate::db::{migrations, PgStore};

/// Pool size; each request runs a single statement.
const MAX_CONNECTIONS: u32 = 5;

/// Picks the backend from the connection string scheme.
#[derive(Debug, Clone, Default)]
pub struct DocumentConnector {
    memory: MemoryConnector,
}

impl DocumentConnector {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Connector for DocumentConnector {
    async fn connect(&self, uri: &str) -> Result<Store, StoreError> {
        match scheme_of(uri) {
            Some("memory") => {
                tracing::warn!("using in-memory document store; data is lost on exit");
                self.memory.connect(uri).await
            }
            Some("postgres" | "postgresql") => {
                let pool = PgPoolOptions::new()
                    .max_connections(MAX_CONNECTIONS)
                    .connect(uri)
                    .await
                    .map_err(StoreError::connect)?;
                migrations::run(&pool).await.map_err(StoreError::connect)?;
                Ok(Arc::new(PgStore::new(pool)))
            }
            Some(other) => Err(StoreError::UnsupportedScheme(other.to_owned())),
            None => Err(StoreError::UnsupportedScheme(uri.to_owned())),
        }
    }
}
