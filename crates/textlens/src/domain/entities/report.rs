//! VectorizeReport - Outcome of one batch vectorization pass

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::DocumentId;

/// A document whose embedding could not be produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemFailure {
    #[schema(value_type = String)]
    pub document_id: DocumentId,
    pub reason: String,
}

/// Per-document result of a batch pass
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Updated(DocumentId),
    Skipped(ItemFailure),
}

/// Summary of a batch pass over a collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VectorizeReport {
    pub collection: String,
    /// Documents considered, including skipped ones
    pub processed: usize,
    /// Documents whose embedding was written back
    pub updated: usize,
    /// Documents left unmodified
    pub failed: Vec<ItemFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl VectorizeReport {
    /// Fold per-item outcomes into a report
    pub fn from_outcomes(
        collection: impl Into<String>,
        outcomes: Vec<ItemOutcome>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let processed = outcomes.len();
        let mut failed = Vec::new();
        for outcome in outcomes {
            if let ItemOutcome::Skipped(failure) = outcome {
                failed.push(failure);
            }
        }

        Self {
            collection: collection.into(),
            processed,
            updated: processed - failed.len(),
            failed,
            started_at,
            finished_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_include_skipped_items() {
        let outcomes = vec![
            ItemOutcome::Updated(DocumentId::new("a")),
            ItemOutcome::Skipped(ItemFailure {
                document_id: DocumentId::new("b"),
                reason: "timeout".to_string(),
            }),
            ItemOutcome::Updated(DocumentId::new("c")),
        ];

        let report = VectorizeReport::from_outcomes("docs", outcomes, Utc::now());

        assert_eq!(report.processed, 3);
        assert_eq!(report.updated, 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].document_id.as_str(), "b");
    }
}
