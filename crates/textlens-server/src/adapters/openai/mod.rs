//! OpenAI-compatible REST adapters
//!
//! Both endpoints authenticate with a static `api-key` header, as Azure
//! OpenAI deployments expect.

mod completion;
mod embedding;

pub use completion::OpenAiCompletionClient;
pub use embedding::OpenAiEmbeddingClient;

use std::time::Duration;

use reqwest::{Client, Response};
use textlens::DomainError;

pub(crate) const API_KEY_HEADER: &str = "api-key";

/// Build the shared HTTP client; no timeout unless one is configured
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Turn a non-2xx response into `RequestFailed`, logging status and body
async fn ensure_success(response: Response, endpoint: &str) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    tracing::error!("{} endpoint returned {}: {}", endpoint, status, body);

    Err(DomainError::RequestFailed(format!(
        "{} endpoint returned {}",
        endpoint, status
    )))
}

fn transport_error(endpoint: &str, err: reqwest::Error) -> DomainError {
    tracing::error!("Error calling {} endpoint: {}", endpoint, err);
    DomainError::RequestFailed(format!("{} endpoint unreachable: {}", endpoint, err))
}
