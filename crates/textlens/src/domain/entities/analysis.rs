//! Analysis - Inbound requests and parsed completion results

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Action, Sentiment};

/// Free text plus the action to perform on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub text: String,
    pub action: Action,
}

impl AnalysisRequest {
    /// Build a request, rejecting blank text for actions that need it
    pub fn new(text: impl Into<String>, action: Action) -> Result<Self, DomainError> {
        let text = text.into();
        if action.requires_text() && text.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "Text input is required for action '{}'",
                action
            )));
        }
        Ok(Self { text, action })
    }

    /// Parse the action from its wire name, then validate
    pub fn parse(text: impl Into<String>, action: Option<&str>) -> Result<Self, DomainError> {
        let action = match action {
            Some(raw) => raw.parse()?,
            None => Action::default(),
        };
        Self::new(text, action)
    }
}

/// Structured sentiment record returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    /// Polarity score in [-1, 1]
    pub score: f32,
    /// Model confidence in [0, 1]
    pub confidence: f32,
}

impl SentimentResult {
    /// Check the numeric fields are inside their documented ranges
    pub fn validate(self) -> Result<Self, DomainError> {
        if !(-1.0..=1.0).contains(&self.score) {
            return Err(DomainError::Interpretation(format!(
                "score {} is outside [-1, 1]",
                self.score
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(DomainError::Interpretation(format!(
                "confidence {} is outside [0, 1]",
                self.confidence
            )));
        }
        Ok(self)
    }
}

/// Completion output after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CompletionResult {
    Sentiment(SentimentResult),
    Text(String),
}
