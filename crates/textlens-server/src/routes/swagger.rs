//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use textlens::{Action, ItemFailure, Sentiment, SentimentResult, VectorizeReport};

use crate::application::ActionOutput;
use crate::models::{ActionResponse, AnalyzeForm, ErrorResponse, TextRequest};
use crate::HealthCheck;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        // Combined endpoint
        super::analyze::analyze,
        // Single-action endpoints
        super::api::analyze,
        super::api::summarize,
        super::api::search,
        super::api::vectorize,
    ),
    info(
        title = "TextLens API",
        version = "0.1.0",
        description = "Sentiment analysis, summarization and embeddings backed by a hosted language model.\n\nAlso embeds every document of a configured collection in one batch pass.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Analysis", description = "Analysis - Sentiment and summary via the completion endpoint"),
        (name = "Embedding", description = "Embedding - Vectors via the embedding endpoint"),
    ),
    components(
        schemas(
            HealthCheck,
            // Requests
            AnalyzeForm,
            TextRequest,
            Action,
            // Results
            ActionResponse,
            ActionOutput,
            Sentiment,
            SentimentResult,
            VectorizeReport,
            ItemFailure,
            ErrorResponse,
        )
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for path in ["/health", "/analyze", "/api/analyze", "/api/summarize", "/api/search", "/api/vectorize"] {
            assert!(paths.iter().any(|p| p.as_str() == path), "missing {}", path);
        }
    }
}
