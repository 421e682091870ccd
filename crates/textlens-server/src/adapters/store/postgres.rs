//! PostgreSQL implementation of DocumentStore
//!
//! Expects a `documents` table:
//!
//! ```sql
//! CREATE TABLE documents (
//!     id         TEXT PRIMARY KEY,
//!     collection TEXT NOT NULL,
//!     text       TEXT,
//!     embedding  REAL[],
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! Any key type that casts to text works for `id`.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use textlens::{Document, DocumentId, DocumentStore, DomainError, EmbeddingVector};

/// PostgreSQL implementation of DocumentStore
pub struct PgDocumentStore {
    pool: PgPool,
    collection: String,
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    text: Option<String>,
    embedding: Option<Vec<f32>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: DocumentId::new(row.id),
            text: row.text,
            embedding: row
                .embedding
                .and_then(|values| EmbeddingVector::try_from(values).ok()),
        }
    }
}

impl PgDocumentStore {
    /// Open a single-connection pool for one batch pass
    pub async fn connect(uri: &str, collection: &str) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(uri)
            .await
            .map_err(|e| DomainError::Store(format!("Failed to connect: {}", e)))?;

        tracing::debug!("Connected to document store for collection '{}'", collection);

        Ok(Self::new(pool, collection))
    }

    pub fn new(pool: PgPool, collection: impl Into<String>) -> Self {
        Self {
            pool,
            collection: collection.into(),
        }
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn find_all(&self) -> Result<Vec<Document>, DomainError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id::text AS id, text, embedding
            FROM documents
            WHERE collection = $1
            ORDER BY id
            "#,
        )
        .bind(&self.collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_embedding(
        &self,
        id: &DocumentId,
        embedding: &EmbeddingVector,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET embedding = $3, updated_at = NOW()
            WHERE collection = $1 AND id::text = $2
            "#,
        )
        .bind(&self.collection)
        .bind(id.as_str())
        .bind(embedding.as_slice())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;

        ensure_updated(result.rows_affected(), id)
    }
}

fn ensure_updated(rows_affected: u64, id: &DocumentId) -> Result<(), DomainError> {
    if rows_affected == 0 {
        tracing::warn!("Document {} disappeared before its embedding was stored", id);
        return Err(DomainError::Store(format!("Document {} not found", id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_row_is_store_error() {
        let id = DocumentId::new("gone");

        assert!(matches!(ensure_updated(0, &id), Err(DomainError::Store(_))));
        assert!(ensure_updated(1, &id).is_ok());
    }
}
