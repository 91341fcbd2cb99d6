//! Document store over a PostgreSQL JSONB table

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use todocrm_core::{Document, DocumentId, DocumentPatch, DocumentStore, StoreError};

/// Document row as stored
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    body: JsonValue,
}

impl DocumentRow {
    fn into_document(self, collection: &str) -> Result<Document, StoreError> {
        match self.body {
            JsonValue::Object(fields) => Ok(Document {
                id: DocumentId::from(self.id),
                created_at: self.created_at,
                fields,
            }),
            other => Err(StoreError::malformed(
                collection,
                self.id,
                format!("expected object body, found {}", other),
            )),
        }
    }
}

/// PostgreSQL-backed document store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError> {
        let row: DocumentRow = sqlx::query_as(
            r#"
            INSERT INTO documents (collection, id, created_at, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at, body
            "#,
        )
        .bind(collection)
        .bind(*doc.id.as_uuid())
        .bind(doc.created_at)
        .bind(JsonValue::Object(doc.fields))
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.into_document(collection)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, created_at, body
            FROM documents
            WHERE collection = $1
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        rows.into_iter()
            .map(|row| row.into_document(collection))
            .collect()
    }

    /// Merge set fields and drop unset fields in one statement.
    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: DocumentId,
        patch: &DocumentPatch,
    ) -> Result<Option<Document>, StoreError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            UPDATE documents
            SET body = (body || $3) - $4::text[]
            WHERE collection = $1 AND id = $2
            RETURNING id, created_at, body
            "#,
        )
        .bind(collection)
        .bind(*id.as_uuid())
        .bind(JsonValue::Object(patch.set_fields().clone()))
        .bind(patch.unset_fields().to_vec())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.map(|row| row.into_document(collection)).transpose()
    }

    async fn find_by_id_and_delete(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            RETURNING id, created_at, body
            "#,
        )
        .bind(collection)
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.map(|row| row.into_document(collection)).transpose()
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(count.max(0) as u64)
    }
}
