//! Schema for the JSONB document table

use sqlx::PgPool;

/// Create the document table and its ordering index if missing.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running document store migrations...");

    // seq breaks created_at ties in insertion order
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            seq BIGSERIAL NOT NULL,
            collection TEXT NOT NULL,
            id UUID NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            body JSONB NOT NULL,
            PRIMARY KEY (collection, id),
            CHECK (jsonb_typeof(body) = 'object')
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS documents_newest_first
        ON documents (collection, created_at DESC, seq DESC)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Document store migrations complete");
    Ok(())
}
