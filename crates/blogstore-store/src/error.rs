// ABOUTME: Error type shared by every store operation.
// ABOUTME: Separates "no such post" from persistence failures (io, serialization).

use blogstore_core::PostId;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post {0} not found")]
    NotFound(PostId),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no post ids left below {max}")]
    IdsExhausted { max: PostId },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
