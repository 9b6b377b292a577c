// ABOUTME: HTTP server for blogstore, exposing post create/read/update over a JSON API.
// ABOUTME: Uses Axum with a shared file store and wraps every reply in a uniform envelope.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{BlogstoreConfig, ConfigError};
pub use error::ApiError;
pub use response::ApiResponse;
pub use routes::create_router;
