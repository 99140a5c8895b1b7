//! Post error types.

use thiserror::Error;
use uuid::Uuid;

use resourcehub_shared::AppError;

/// Post operation errors.
#[derive(Debug, Error)]
pub enum PostError {
    /// Post not found.
    #[error("post not found: {0}")]
    NotFound(Uuid),

    /// Post exists but is owned by another principal.
    #[error("post {0} is not owned by the requesting principal")]
    Forbidden(Uuid),

    /// A required field is missing or out of range.
    #[error("invalid post: {0}")]
    Validation(String),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl PostError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound(id)
    }

    /// Create a forbidden error.
    #[must_use]
    pub fn forbidden(id: Uuid) -> Self {
        Self::Forbidden(id)
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound(id) => Self::NotFound(format!("post {id}")),
            PostError::Forbidden(id) => Self::Forbidden(format!("post {id}")),
            PostError::Validation(msg) => Self::Validation(msg),
            PostError::Repository(msg) => Self::Database(msg),
        }
    }
}
