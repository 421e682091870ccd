//! API Routes - One JSON route per action

use axum::{extract::State, routing::post, Json, Router};

use textlens::{Action, AnalysisRequest};

use crate::application::ActionOutput;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::models::{ActionResponse, ErrorResponse, TextRequest};
use crate::AppState;

async fn run(
    state: &AppState,
    text: String,
    action: Action,
) -> Result<Json<ActionResponse>, ApiError> {
    let request = AnalysisRequest::new(text, action)?;
    let result = state.analysis.handle(&request).await?;
    Ok(Json(ActionResponse { action, result }))
}

/// Sentiment analysis
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Sentiment record", body = ActionResponse),
        (status = 400, description = "Empty text", body = ErrorResponse),
        (status = 502, description = "Model request failed or output could not be interpreted", body = ErrorResponse)
    ),
    tag = "Analysis"
)]
pub async fn analyze(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TextRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    run(&state, payload.text, Action::Analyze).await
}

/// Summarization
#[utoipa::path(
    post,
    path = "/api/summarize",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Summary", body = ActionResponse),
        (status = 400, description = "Empty text", body = ErrorResponse),
        (status = 502, description = "Model request failed", body = ErrorResponse)
    ),
    tag = "Analysis"
)]
pub async fn summarize(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TextRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    run(&state, payload.text, Action::Summarize).await
}

/// Embedding of the input text
#[utoipa::path(
    post,
    path = "/api/search",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Embedding vector", body = ActionResponse),
        (status = 400, description = "Empty text", body = ErrorResponse),
        (status = 502, description = "Embedding request failed", body = ErrorResponse)
    ),
    tag = "Embedding"
)]
pub async fn search(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TextRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    run(&state, payload.text, Action::Search).await
}

/// Embed every document of the configured collection
#[utoipa::path(
    post,
    path = "/api/vectorize",
    responses(
        (status = 200, description = "Batch report", body = ActionResponse),
        (status = 503, description = "No document store configured", body = ErrorResponse),
        (status = 500, description = "Document store failure", body = ErrorResponse)
    ),
    tag = "Embedding"
)]
pub async fn vectorize(State(state): State<AppState>) -> Result<Json<ActionResponse>, ApiError> {
    let report = state.analysis.vectorize_collection().await?;
    Ok(Json(ActionResponse {
        action: Action::VectorizeCollection,
        result: ActionOutput::Vectorized(report),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/summarize", post(summarize))
        .route("/api/search", post(search))
        .route("/api/vectorize", post(vectorize))
}
