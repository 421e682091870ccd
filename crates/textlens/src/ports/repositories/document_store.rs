//! Document Store Port
//!
//! Abstract interface over the external store holding the documents
//! of one collection.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Document, DocumentId, EmbeddingVector};

/// Collection-scoped document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Name of the collection this store reads and writes
    fn collection(&self) -> &str;

    /// Fetch every document of the collection
    async fn find_all(&self) -> Result<Vec<Document>, DomainError>;

    /// Write the embedding onto the document with the given key
    async fn update_embedding(
        &self,
        id: &DocumentId,
        embedding: &EmbeddingVector,
    ) -> Result<(), DomainError>;
}
