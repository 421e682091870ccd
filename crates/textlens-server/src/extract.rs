//! Request extractors
//!
//! Body rejections become `Validation` errors so every JSON route answers
//! with the error envelope instead of axum's plain-text rejection.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use textlens::DomainError;

use crate::error::ApiError;

/// `Json<T>` with rejections mapped to `400 invalid_request`
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| DomainError::Validation(e.body_text()))?;
        Ok(Self(value))
    }
}
