// ABOUTME: API-level error type mapping validation and store failures to HTTP replies.
// ABOUTME: Persistence details are logged server-side and never included in the response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use blogstore_core::ValidationError;
use blogstore_store::StoreError;
use thiserror::Error;

use crate::response::ApiResponse;

/// Errors a blog API handler can return. The `Display` text is what the caller sees.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid blog ID format")]
    InvalidId,

    #[error("Invalid JSON format")]
    InvalidJson,

    #[error("Blog ID mismatch")]
    IdMismatch,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Blog not found")]
    NotFound,

    #[error("Failed to load blog")]
    Load(#[source] StoreError),

    #[error("Failed to save blog")]
    Save(#[source] StoreError),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    NoRoute,
}

impl ApiError {
    /// Classify a failed read: a missing post is a 404, anything else a 500.
    pub fn from_load(err: StoreError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound
        } else {
            ApiError::Load(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId
            | ApiError::InvalidJson
            | ApiError::IdMismatch
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::NoRoute => StatusCode::NOT_FOUND,
            ApiError::Load(_) | ApiError::Save(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Load(ref e) | ApiError::Save(ref e) = self {
            tracing::error!("{}: {}", self, e);
        }
        (self.status(), Json(ApiResponse::failure(self.to_string()))).into_response()
    }
}
