//! Attachment upload routes.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use tracing::info;

use super::app_error_response;
use crate::{AppState, middleware::AuthUser};
use resourcehub_shared::AppError;

/// Multipart field name carrying the attachment.
const FILE_FIELD: &str = "file";

/// Headroom on top of the attachment limit for multipart framing.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Creates the attachment routes.
///
/// The body limit is sized from the vault's configured maximum so oversized
/// uploads are cut off at the transport rather than buffered whole.
pub fn routes(max_attachment_size: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_attachment_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new().route(
        "/attachments",
        post(upload_attachment).layer(DefaultBodyLimit::max(body_limit)),
    )
}

/// POST `/attachments` - Upload a blob into the principal's vault partition.
///
/// Expects a multipart form with a single `file` field; responds with the
/// generated attachment key to reference from a post.
async fn upload_attachment(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Response {
    let owner = auth.principal();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return app_error_response(AppError::Validation(format!(
                    "malformed multipart body: {e}"
                )));
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(ToString::to_string);
        let content_type = field
            .content_type()
            .map_or_else(|| "application/octet-stream".to_string(), ToString::to_string);

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return app_error_response(AppError::PayloadTooLarge(format!(
                    "could not read attachment body: {e}"
                )));
            }
        };

        return match state
            .vault
            .upload(owner, bytes, &content_type, filename.as_deref())
            .await
        {
            Ok(key) => {
                info!(owner = %owner, key = %key, "Attachment uploaded");
                (StatusCode::OK, Json(json!({ "attachment": key }))).into_response()
            }
            Err(e) => app_error_response(e.into()),
        };
    }

    app_error_response(AppError::Validation(format!(
        "multipart body is missing a '{FILE_FIELD}' field"
    )))
}
