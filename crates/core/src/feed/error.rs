//! Feed error types.

use thiserror::Error;

use crate::post::PostError;
use resourcehub_shared::AppError;

/// Feed assembly errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Personal feed requested without a principal.
    #[error("authentication required to assemble a personal feed")]
    Unauthenticated,

    /// Underlying post operation failed.
    #[error(transparent)]
    Post(#[from] PostError),
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Unauthenticated => {
                Self::Unauthenticated("personal feed requires a principal".to_string())
            }
            FeedError::Post(e) => e.into(),
        }
    }
}
