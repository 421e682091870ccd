//! TextLens API Client

use anyhow::{bail, Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// API Client for TextLens
pub struct TextLensClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Response Types
// ============================================

/// `{action, result}` envelope; only the result is kept
#[derive(Debug, Deserialize)]
struct ActionResponse<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
pub struct SentimentResponse {
    pub sentiment: String,
    pub score: f32,
    pub confidence: f32,
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
    pub dimensions: usize,
}

#[derive(Debug, Deserialize)]
pub struct ItemFailure {
    pub document_id: String,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct VectorizeResponse {
    pub collection: String,
    pub processed: usize,
    pub updated: usize,
    pub failed: Vec<ItemFailure>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

impl TextLensClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(|k| k.to_string()),
        }
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Sentiment analysis
    pub async fn analyze(&self, text: &str) -> Result<SentimentResponse> {
        self.post_text("/api/analyze", text).await
    }

    /// Summarization
    pub async fn summarize(&self, text: &str) -> Result<SummaryResponse> {
        self.post_text("/api/summarize", text).await
    }

    /// Embedding of the text
    pub async fn search(&self, text: &str) -> Result<EmbeddingResponse> {
        self.post_text("/api/search", text).await
    }

    /// Embed every document of the server's collection
    pub async fn vectorize(&self) -> Result<VectorizeResponse> {
        let url = format!("{}/api/vectorize", self.base_url);
        let resp = self
            .authorized(self.client.post(&url))
            .send()
            .await
            .context("Failed to connect to TextLens API")?;

        Self::read_result(resp).await
    }

    async fn post_text<T: DeserializeOwned>(&self, path: &str, text: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .authorized(self.client.post(&url))
            .json(&TextRequest { text })
            .send()
            .await
            .context("Failed to connect to TextLens API")?;

        Self::read_result(resp).await
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn read_result<T: DeserializeOwned>(resp: Response) -> Result<T> {
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => bail!("API error ({}, {}): {}", status, err.code, err.error),
                Err(_) => bail!("API error ({}): {}", status, body),
            }
        }

        let body: ActionResponse<T> = resp.json().await.context("Failed to parse response")?;

        Ok(body.result)
    }
}
