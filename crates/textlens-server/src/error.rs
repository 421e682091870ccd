//! API error mapping
//!
//! Every failure resolves to a JSON response; nothing here ends the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use textlens::DomainError;

use crate::models::ErrorResponse;

/// Error returned by JSON handlers
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for(&self.0)
    }
}

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) | DomainError::UnknownAction(_) => StatusCode::BAD_REQUEST,
        DomainError::RequestFailed(_) | DomainError::Interpretation(_) => StatusCode::BAD_GATEWAY,
        DomainError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Rejected request: {}", self.0);
        }
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}
