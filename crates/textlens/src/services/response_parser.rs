//! Model output parsing
//!
//! Models often wrap JSON answers in Markdown code fences. The markers are
//! removed before decoding.

use crate::domain::{DomainError, SentimentResult};

/// Remove every "```json" and "```" marker and trim the rest
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode a sentiment record from raw model output
pub fn parse_sentiment(raw: &str) -> Result<SentimentResult, DomainError> {
    let cleaned = strip_code_fences(raw);

    let parsed: SentimentResult = serde_json::from_str(&cleaned).map_err(|e| {
        tracing::error!("Error parsing model output as JSON: {}", e);
        DomainError::Interpretation(e.to_string())
    })?;

    parsed.validate()
}
