//! Bearer-token principal extraction.
//!
//! Token issuance belongs to the external authentication provider; these
//! extractors only validate the signature and expose the `sub` claim as
//! the opaque principal id.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use resourcehub_shared::{Claims, JwtError};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

type AuthRejection = (StatusCode, Json<serde_json::Value>);

fn unauthorized(error: &str, message: &str) -> AuthRejection {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": error, "message": message })),
    )
}

/// Validate the bearer token carried by a request, if any.
///
/// `Ok(None)` means no token was presented; a token that is present but
/// invalid is always an error rather than silent anonymity.
fn validate_bearer(parts: &Parts, state: &AppState) -> Result<Option<Claims>, AuthRejection> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = header.and_then(extract_bearer_token) else {
        return Ok(None);
    };

    match state.jwt.validate_token(token) {
        Ok(claims) => Ok(Some(claims)),
        Err(JwtError::Expired) => Err(unauthorized("token_expired", "Token has expired")),
        Err(_) => Err(unauthorized(
            "invalid_token",
            "Invalid or malformed token",
        )),
    }
}

/// Extractor for an authenticated principal.
///
/// Use this in handlers that require authentication:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let principal = auth.principal();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the principal ID from the claims.
    #[must_use]
    pub const fn principal(&self) -> Uuid {
        self.0.principal()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match validate_bearer(parts, state)? {
            Some(claims) => Ok(Self(claims)),
            None => Err(unauthorized(
                "missing_token",
                "Authorization header with Bearer token is required",
            )),
        }
    }
}

/// Extractor for an optional principal on public routes.
///
/// A missing token yields an anonymous request; an invalid token is still
/// rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Claims>);

impl MaybeAuthUser {
    /// Returns the principal ID, when a valid token was presented.
    #[must_use]
    pub fn principal(&self) -> Option<Uuid> {
        self.0.as_ref().map(Claims::principal)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(validate_bearer(parts, state)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("abc"), None);
    }
}
