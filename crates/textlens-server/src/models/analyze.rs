//! Analyze DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use textlens::{Action, DomainError};

use crate::application::ActionOutput;

/// `POST /analyze` body, form-encoded or JSON
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: Option<String>,
    /// One of analyze, summarize, search, vectorize_collection (default analyze)
    #[serde(default)]
    pub action: Option<String>,
}

/// Body of the single-action `/api/*` routes
#[derive(Debug, Deserialize, ToSchema)]
pub struct TextRequest {
    pub text: String,
}

/// Successful action response
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub action: Action,
    pub result: ActionOutput,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always "error"
    pub status: String,
    pub code: String,
    pub error: String,
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        Self {
            status: "error".to_string(),
            code: err.code().to_string(),
            error: public_message(err),
        }
    }
}

/// Message shown to callers. Upstream details stay in the logs.
pub fn public_message(err: &DomainError) -> String {
    match err {
        DomainError::Validation(msg) => msg.clone(),
        DomainError::UnknownAction(action) => format!(
            "Unknown action '{}'. Expected one of: analyze, summarize, search, vectorize_collection",
            action
        ),
        DomainError::RequestFailed(_) => "Error fetching results from the language model.".to_string(),
        DomainError::Interpretation(_) => "Unable to parse response from the language model.".to_string(),
        DomainError::StoreUnavailable => "No document store is configured.".to_string(),
        DomainError::Store(_) => "Document store operation failed.".to_string(),
    }
}
