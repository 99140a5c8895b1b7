//! Post management and feed routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::app_error_response;
use crate::{
    AppState,
    middleware::{AuthUser, MaybeAuthUser},
};
use resourcehub_core::feed::FeedService;
use resourcehub_core::post::{Keyword, PostFields, PostService};
use resourcehub_db::PostRepository;

/// Creates the post routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(personal_feed).post(create_post))
        .route("/posts/all", get(global_feed))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating or replacing a post.
#[derive(Debug, Deserialize)]
pub struct PostPayload {
    /// Free-text description.
    pub blurb: String,
    /// The shared URL.
    pub link: String,
    /// Language tag.
    pub language: String,
    /// Keyword tags.
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    /// Star rating, 1 to 5.
    pub rating: i16,
    /// Vault key of an already uploaded attachment.
    #[serde(default)]
    pub attachment: Option<String>,
}

impl From<PostPayload> for PostFields {
    fn from(payload: PostPayload) -> Self {
        Self {
            blurb: payload.blurb,
            link: payload.link,
            language: payload.language,
            keywords: payload.keywords,
            rating: payload.rating,
            attachment: payload.attachment,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn post_service(state: &AppState) -> PostService<PostRepository> {
    PostService::new(Arc::new(PostRepository::new((*state.db).clone())))
}

fn feed_service(state: &AppState) -> FeedService<PostRepository> {
    FeedService::new(
        Arc::new(PostRepository::new((*state.db).clone())),
        state.vault.clone(),
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/posts` - The principal's own feed.
async fn personal_feed(State(state): State<AppState>, auth: AuthUser) -> Response {
    match feed_service(&state)
        .assemble_personal(Some(auth.principal()))
        .await
    {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => app_error_response(e.into()),
    }
}

/// GET `/posts/all` - The global feed of every post.
async fn global_feed(State(state): State<AppState>, viewer: MaybeAuthUser) -> Response {
    match feed_service(&state).assemble_global(viewer.principal()).await {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => app_error_response(e.into()),
    }
}

/// GET `/posts/{id}` - A single post as a presentation-ready view.
async fn get_post(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<Uuid>,
) -> Response {
    let post = match post_service(&state).get(id).await {
        Ok(post) => post,
        Err(e) => return app_error_response(e.into()),
    };

    let view = feed_service(&state).resolve(post, viewer.principal()).await;
    (StatusCode::OK, Json(view)).into_response()
}

/// POST `/posts` - Create a post owned by the principal.
async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<PostPayload>,
) -> Response {
    match post_service(&state)
        .create(auth.principal(), payload.into())
        .await
    {
        Ok(post) => {
            info!(post_id = %post.id, owner = %post.owner, "Post created");
            (StatusCode::CREATED, Json(post)).into_response()
        }
        Err(e) => app_error_response(e.into()),
    }
}

/// PUT `/posts/{id}` - Replace the mutable fields of an owned post.
async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostPayload>,
) -> Response {
    match post_service(&state)
        .update(id, auth.principal(), payload.into())
        .await
    {
        Ok(post) => {
            info!(post_id = %post.id, owner = %post.owner, "Post updated");
            (StatusCode::OK, Json(post)).into_response()
        }
        Err(e) => app_error_response(e.into()),
    }
}

/// DELETE `/posts/{id}` - Delete an owned post and release its attachment.
async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Response {
    let owner = auth.principal();

    match post_service(&state).delete(id, owner).await {
        Ok(post) => {
            // Release the blob best-effort; the record is already gone and a
            // leftover blob must not fail the request.
            if let Some(key) = &post.attachment {
                if let Err(e) = state.vault.delete(owner, key).await {
                    warn!(post_id = %id, key = %key, error = %e, "Failed to release attachment blob");
                }
            }

            info!(post_id = %id, owner = %owner, "Post deleted");
            (StatusCode::OK, Json(json!({ "deleted": true }))).into_response()
        }
        Err(e) => app_error_response(e.into()),
    }
}
