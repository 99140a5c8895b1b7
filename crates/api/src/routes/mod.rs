//! API route definitions.

use axum::{Json, Router, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;
use tracing::error;

use crate::AppState;
use resourcehub_shared::AppError;

pub mod attachments;
pub mod health;
pub mod posts;

/// Creates the API router with all routes.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(posts::routes())
        .merge(attachments::routes(state.vault.max_attachment_size()))
}

/// Map an application error onto the wire format.
///
/// Server-side failures are logged here and reported with a generic
/// message; client errors carry their own description.
pub(crate) fn app_error_response(err: AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if status.is_server_error() {
        error!(error = %err, "request failed");
        "An error occurred".to_string()
    } else {
        err.to_string()
    };

    (
        status,
        Json(json!({ "error": err.error_code(), "message": message })),
    )
        .into_response()
}
