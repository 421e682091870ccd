//! Embedding Service Port
//!
//! Abstract interface for text embedding generation.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, EmbeddingVector};

/// Service interface for generating text embeddings
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generate the embedding vector for one text.
    ///
    /// Failures come back as values so batch callers can skip the item.
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, DomainError>;
}
