//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Transport, auth or status failure while calling a remote model
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Model answered, but the content is not in the expected shape
    #[error("Could not interpret model output: {0}")]
    Interpretation(String),

    #[error("Document store not configured")]
    StoreUnavailable,

    #[error("Document store error: {0}")]
    Store(String),
}

impl DomainError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "invalid_request",
            DomainError::UnknownAction(_) => "unknown_action",
            DomainError::RequestFailed(_) => "request_failed",
            DomainError::Interpretation(_) => "interpretation_failed",
            DomainError::StoreUnavailable => "store_unavailable",
            DomainError::Store(_) => "store_error",
        }
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(_) | DomainError::UnknownAction(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_distinguish_transport_from_interpretation() {
        let transport = DomainError::RequestFailed("502".to_string());
        let parse = DomainError::Interpretation("not json".to_string());

        assert_eq!(transport.code(), "request_failed");
        assert_eq!(parse.code(), "interpretation_failed");
        assert!(!transport.is_client_error());
        assert!(!parse.is_client_error());
    }

    #[test]
    fn test_client_errors() {
        assert!(DomainError::Validation("empty".into()).is_client_error());
        assert!(DomainError::UnknownAction("translate".into()).is_client_error());
        assert!(!DomainError::StoreUnavailable.is_client_error());
    }
}
