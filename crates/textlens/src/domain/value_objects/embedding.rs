//! EmbeddingVector - Numeric vector returned by an embedding endpoint

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

/// Embedding vector. Dimensionality is decided by the remote model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl TryFrom<Vec<f32>> for EmbeddingVector {
    type Error = DomainError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        if values.is_empty() {
            return Err(DomainError::RequestFailed(
                "Embedding endpoint returned an empty vector".to_string(),
            ));
        }
        Ok(Self(values))
    }
}

impl From<EmbeddingVector> for Vec<f32> {
    fn from(vector: EmbeddingVector) -> Self {
        vector.0
    }
}
