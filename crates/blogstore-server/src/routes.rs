// ABOUTME: Route definitions for the blogstore HTTP API.
// ABOUTME: Assembles the blog routes, envelope fallbacks, and request tracing into one Axum Router.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;
use crate::error::ApiError;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/blogs", post(api::blogs::create_blog))
        .route("/api/blogs/", post(api::blogs::create_blog))
        .route(
            "/api/blogs/{id}",
            get(api::blogs::get_blog)
                .put(api::blogs::update_blog)
                .post(api::blogs::create_blog),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(no_route)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn no_route() -> ApiError {
    ApiError::NoRoute
}
