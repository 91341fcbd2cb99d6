//! In-process document store
//!
//! Used for tests and `memory://` connection strings. Contents live as long
//! as the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{scheme_of, Connector, Document, DocumentId, DocumentPatch, DocumentStore, Store, StoreError};

/// Collections kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_store(self) -> Store {
        Arc::new(self)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_owned()).or_default();
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|docs| docs.iter().rev().cloned().collect())
            .unwrap_or_default();
        // stable sort: equal timestamps keep newest-inserted first
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: DocumentId,
        patch: &DocumentPatch,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };
        patch.apply(&mut doc.fields);
        Ok(Some(doc.clone()))
    }

    async fn find_by_id_and_delete(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        Ok(docs
            .iter()
            .position(|d| d.id == id)
            .map(|idx| docs.remove(idx)))
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as u64))
    }
}

/// Connector for `memory://` connection strings.
///
/// Every successful connect hands out the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    store: MemoryStore,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store handed out by this connector.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, uri: &str) -> Result<Store, StoreError> {
        match scheme_of(uri) {
            Some("memory") => Ok(self.store.clone().into_store()),
            _ => Err(StoreError::UnsupportedScheme(uri.to_owned())),
        }
    }
}
