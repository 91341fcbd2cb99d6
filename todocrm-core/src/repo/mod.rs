//! Data-access operations
//!
//! One repository per entity. Every public operation:
//! - acquires the shared store handle through [`Database`]
//! - performs exactly one document-store call
//! - returns an [`Envelope`]; nothing escapes as an error or panic
//!
//! Validation runs before the store is touched. Storage failures are logged
//! here and reported to the caller with a generic message.

pub mod contacts;
pub mod todos;

pub use contacts::ContactRepo;
pub use todos::TodoRepo;

use crate::connection::Database;
use crate::envelope::Envelope;
use crate::error::DataError;
use crate::models::Entity;
use crate::store::{Document, DocumentId, DocumentPatch};

/// Operation names used in failure messages and logs.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    Create,
    List,
    Update,
    Delete,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "fetch",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Convert an operation result into its envelope, logging failures.
pub(crate) fn settle<E: Entity, T>(action: Action, result: Result<T, DataError>) -> Envelope<T> {
    let entity = E::KIND;
    match result {
        Ok(data) => Envelope::ok(data),
        Err(err @ DataError::Storage(_)) => {
            tracing::error!(entity = %entity, action = action.verb(), error = %err, "operation failed");
            let noun = entity.name().to_lowercase();
            let message = match action {
                Action::List => format!("Failed to {} {}s", action.verb(), noun),
                _ => format!("Failed to {} {}", action.verb(), noun),
            };
            Envelope::fail(err.kind(), message)
        }
        Err(err) => {
            tracing::debug!(entity = %entity, action = action.verb(), error = %err, "operation rejected");
            Envelope::fail(err.kind(), err.to_string())
        }
    }
}

/// Parse a caller-supplied id. Ids that cannot name a document are reported
/// as not found.
fn parse_id<E: Entity>(id: &str) -> Result<DocumentId, DataError> {
    id.parse()
        .map_err(|_| DataError::not_found(E::KIND, id))
}

async fn insert<E: Entity>(db: &Database, doc: Document) -> Result<E, DataError> {
    let store = db.connect().await?;
    let stored = store.insert(E::KIND.collection(), doc).await?;
    Ok(E::from_document(stored)?)
}

async fn find_all<E: Entity>(db: &Database) -> Result<Vec<E>, DataError> {
    let store = db.connect().await?;
    let docs = store.find_all(E::KIND.collection()).await?;
    Ok(docs
        .into_iter()
        .map(E::from_document)
        .collect::<Result<_, _>>()?)
}

async fn update<E: Entity>(db: &Database, id: &str, patch: &DocumentPatch) -> Result<E, DataError> {
    let doc_id = parse_id::<E>(id)?;
    let store = db.connect().await?;
    let doc = store
        .find_by_id_and_update(E::KIND.collection(), doc_id, patch)
        .await?
        .ok_or_else(|| DataError::not_found(E::KIND, id))?;
    Ok(E::from_document(doc)?)
}

async fn delete<E: Entity>(db: &Database, id: &str) -> Result<E, DataError> {
    let doc_id = parse_id::<E>(id)?;
    let store = db.connect().await?;
    let doc = store
        .find_by_id_and_delete(E::KIND.collection(), doc_id)
        .await?
        .ok_or_else(|| DataError::not_found(E::KIND, id))?;
    Ok(E::from_document(doc)?)
}
