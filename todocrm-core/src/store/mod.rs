//! Document store abstraction
//!
//! Documents live in named collections. Every operation touches a single
//! document and is atomic at that granularity; there are no multi-document
//! transactions.
//!
//! Backends:
//! - [`memory::MemoryStore`] (`memory://`)
//! - PostgreSQL JSONB rows, provided by `todocrm-server`

pub mod memory;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub use memory::{MemoryConnector, MemoryStore};

/// Shared handle to a connected store.
pub type Store = Arc<dyn DocumentStore>;

/// Server-assigned document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored document: identity and creation time plus free-form fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub created_at: DateTime<Utc>,
    pub fields: Map<String, Value>,
}

impl Document {
    /// New document with a fresh id, stamped now.
    ///
    /// Timestamps are kept to microseconds, the finest precision every
    /// backend stores.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            id: DocumentId::new(),
            created_at: Utc::now().trunc_subsecs(6),
            fields,
        }
    }
}

/// Field-level change set applied by `find_by_id_and_update`.
///
/// Fields not mentioned are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    set: Map<String, Value>,
    unset: Vec<String>,
}

impl DocumentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.unset.retain(|f| f != field);
        self.set.insert(field.to_owned(), value.into());
        self
    }

    pub fn unset(&mut self, field: &str) -> &mut Self {
        self.set.remove(field);
        if !self.unset.iter().any(|f| f == field) {
            self.unset.push(field.to_owned());
        }
        self
    }

    pub fn set_fields(&self) -> &Map<String, Value> {
        &self.set
    }

    pub fn unset_fields(&self) -> &[String] {
        &self.unset
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty()
    }

    /// Apply to a field map in place.
    pub fn apply(&self, fields: &mut Map<String, Value>) {
        for (key, value) in &self.set {
            fields.insert(key.clone(), value.clone());
        }
        for key in &self.unset {
            fields.remove(key);
        }
    }
}

/// Store-level failure.
///
/// Cloneable so a single failed connection attempt can be reported to every
/// caller that was waiting on it.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("unsupported connection string scheme: '{0}'")]
    UnsupportedScheme(String),

    #[error("failed to connect to document store: {0}")]
    Connect(Arc<dyn std::error::Error + Send + Sync>),

    #[error("document store error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),

    #[error("malformed document '{id}' in '{collection}': {reason}")]
    Malformed {
        collection: String,
        id: String,
        reason: String,
    },
}

impl StoreError {
    pub fn connect(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connect(Arc::new(err))
    }

    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    pub fn malformed(collection: &str, id: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::Malformed {
            collection: collection.to_owned(),
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Single-document operations over named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document and return it as stored.
    async fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError>;

    /// All documents, newest `created_at` first. Ties go to the most
    /// recently inserted document.
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Apply `patch` to the document with `id`, returning the new state, or
    /// `None` when no document matches.
    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: DocumentId,
        patch: &DocumentPatch,
    ) -> Result<Option<Document>, StoreError>;

    /// Remove the document with `id`, returning its last state, or `None`
    /// when no document matches.
    async fn find_by_id_and_delete(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError>;

    async fn count(&self, collection: &str) -> Result<u64, StoreError>;
}

/// Establishes a store handle from a connection string.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, uri: &str) -> Result<Store, StoreError>;
}

/// Scheme part of a connection string (`"postgres"` for `postgres://...`).
pub fn scheme_of(uri: &str) -> Option<&str> {
    uri.split_once("://").map(|(scheme, _)| scheme)
}
