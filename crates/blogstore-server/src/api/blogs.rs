// ABOUTME: Blog post API handlers for reading, creating, and updating posts.
// ABOUTME: Validates input, decides create vs. update, and delegates persistence to the store.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use blogstore_core::{BlogPost, MAX_POST_ID, PostId};
use blogstore_store::PostStore;

use crate::app_state::SharedState;
use crate::error::ApiError;
use crate::response::ApiResponse;

type PostReply = Result<Json<ApiResponse<BlogPost>>, ApiError>;

/// Parse a path segment as a post id. Only plain decimal digits up to
/// `MAX_POST_ID` are accepted.
pub fn parse_post_id(raw: &str) -> Result<PostId, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidId);
    }
    match raw.parse::<PostId>() {
        Ok(id) if id <= MAX_POST_ID => Ok(id),
        _ => Err(ApiError::InvalidId),
    }
}

/// Decode and validate a submitted post. Bodies are parsed regardless of
/// Content-Type.
fn parse_post(body: &[u8]) -> Result<BlogPost, ApiError> {
    let post: BlogPost = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("rejected post body: {}", e);
        ApiError::InvalidJson
    })?;
    post.validate()?;
    Ok(post)
}

/// GET /api/blogs/{id} - Fetch a post and count the view.
pub async fn get_blog(State(state): State<SharedState>, Path(id): Path<String>) -> PostReply {
    let id = parse_post_id(&id)?;

    let outcome = state.store.record_view(id).map_err(ApiError::from_load)?;

    Ok(Json(ApiResponse::ok(
        "Blog retrieved successfully",
        outcome.post,
    )))
}

/// POST /api/blogs - Create a post under a freshly allocated id.
/// Any id in the body is ignored.
pub async fn create_blog(State(state): State<SharedState>, body: Bytes) -> PostReply {
    let mut post = parse_post(&body)?;

    post.id = state
        .allocator
        .allocate(&state.store)
        .map_err(ApiError::Save)?;
    let saved = state.store.put(post).map_err(ApiError::Save)?;

    tracing::info!("created post {}", saved.id);
    Ok(Json(ApiResponse::ok("Blog saved successfully", saved)))
}

/// PUT /api/blogs/{id} - Replace the post stored under `id`. The body must
/// carry the same id.
pub async fn update_blog(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> PostReply {
    let post = parse_post(&body)?;

    let id = parse_post_id(&id)?;
    if post.id != id {
        return Err(ApiError::IdMismatch);
    }

    let saved = state.store.put(post).map_err(ApiError::Save)?;

    tracing::info!("updated post {}", saved.id);
    Ok(Json(ApiResponse::ok("Blog saved successfully", saved)))
}
