//! Embedding client
//!
//! Request `{input}`, response `{data: [{embedding}]}`. Only the first
//! embedding of the payload is used.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use textlens::{DomainError, EmbeddingService, EmbeddingVector};

use super::{ensure_success, transport_error, API_KEY_HEADER};

const ENDPOINT: &str = "Embedding";

/// Embedding endpoint client
#[derive(Clone)]
pub struct OpenAiEmbeddingClient {
    client: Client,
    url: String,
    api_key: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiEmbeddingClient {
    pub fn new(client: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl EmbeddingService for OpenAiEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&EmbeddingRequest { input: text })
            .send()
            .await
            .map_err(|e| transport_error(ENDPOINT, e))?;

        let response = ensure_success(response, ENDPOINT).await?;

        let payload: EmbeddingResponse = response.json().await.map_err(|e| {
            tracing::error!("Malformed embedding response: {}", e);
            DomainError::RequestFailed(format!("Malformed embedding response: {}", e))
        })?;

        let values = payload
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| DomainError::RequestFailed("No embedding returned".to_string()))?;

        EmbeddingVector::try_from(values)
    }
}
