//! Chat-completion client
//!
//! Request `{messages, max_tokens, temperature}`, response
//! `{choices: [{message: {content}}]}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use textlens::{ChatMessage, CompletionOptions, CompletionService, DomainError};

use super::{ensure_success, transport_error, API_KEY_HEADER};

const ENDPOINT: &str = "Completion";

/// Completion endpoint client
#[derive(Clone)]
pub struct OpenAiCompletionClient {
    client: Client,
    url: String,
    api_key: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompletionClient {
    pub fn new(client: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, DomainError> {
        let request = CompletionRequest {
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(ENDPOINT, e))?;

        let response = ensure_success(response, ENDPOINT).await?;

        let payload: CompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Malformed completion response: {}", e);
            DomainError::RequestFailed(format!("Malformed completion response: {}", e))
        })?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| DomainError::RequestFailed("No completion choices returned".into()))
    }
}
