//! Action - Which operation a request performs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

/// Request action discriminator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Sentiment analysis via the completion endpoint
    #[default]
    Analyze,
    /// Summarization via the completion endpoint
    Summarize,
    /// Embed the raw input text
    Search,
    /// Embed every document of the configured collection
    VectorizeCollection,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Analyze,
        Action::Summarize,
        Action::Search,
        Action::VectorizeCollection,
    ];

    /// Whether the action needs non-empty input text
    pub fn requires_text(&self) -> bool {
        !matches!(self, Action::VectorizeCollection)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Analyze => "analyze",
            Action::Summarize => "summarize",
            Action::Search => "search",
            Action::VectorizeCollection => "vectorize_collection",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "analyze" => Ok(Action::Analyze),
            "summarize" => Ok(Action::Summarize),
            "search" => Ok(Action::Search),
            "vectorize_collection" => Ok(Action::VectorizeCollection),
            _ => Err(DomainError::UnknownAction(s.to_string())),
        }
    }
}
