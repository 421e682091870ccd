//! Batch Vectorizer (Use Case)
//!
//! Embeds every document of a collection and writes the vectors back.
//! One remote call is in flight at a time.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{DomainError, ItemFailure, ItemOutcome, VectorizeReport};
use crate::ports::{DocumentStore, EmbeddingService};

/// Application service for collection vectorization
pub struct BatchVectorizer<E: EmbeddingService + ?Sized> {
    embedding: Arc<E>,
}

impl<E: EmbeddingService + ?Sized> BatchVectorizer<E> {
    pub fn new(embedding: Arc<E>) -> Self {
        Self { embedding }
    }

    /// Vectorize all documents in the store's collection.
    ///
    /// A failed embedding leaves its document untouched and is recorded in
    /// the report. Store read and write errors abort the pass.
    pub async fn vectorize_all<S: DocumentStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<VectorizeReport, DomainError> {
        let started_at = Utc::now();
        let documents = store.find_all().await?;

        tracing::info!(
            "Vectorizing {} documents in collection '{}'",
            documents.len(),
            store.collection()
        );

        let mut outcomes = Vec::with_capacity(documents.len());
        for document in documents {
            match self.embedding.embed(document.text_or_empty()).await {
                Ok(vector) => {
                    store.update_embedding(&document.id, &vector).await?;
                    tracing::debug!(
                        "Stored {}-dim embedding for document {}",
                        vector.dimensions(),
                        document.id
                    );
                    outcomes.push(ItemOutcome::Updated(document.id));
                }
                Err(e) => {
                    tracing::warn!("Skipping document {}: {}", document.id, e);
                    outcomes.push(ItemOutcome::Skipped(ItemFailure {
                        document_id: document.id,
                        reason: e.to_string(),
                    }));
                }
            }
        }

        let report = VectorizeReport::from_outcomes(store.collection(), outcomes, started_at);

        tracing::info!(
            "Vectorization of '{}' finished: {} processed, {} updated, {} skipped",
            report.collection,
            report.processed,
            report.updated,
            report.failed.len()
        );

        Ok(report)
    }
}
