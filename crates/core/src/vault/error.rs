//! Vault error types.

use thiserror::Error;

use resourcehub_shared::AppError;

/// Vault operation errors.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Attachment size exceeds maximum allowed.
    #[error("attachment size {size} bytes exceeds maximum allowed {max} bytes")]
    SizeExceeded {
        /// Actual attachment size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Key lies outside the caller's vault partition.
    #[error("attachment key '{key}' is outside the caller's vault partition")]
    Forbidden {
        /// The offending key.
        key: String,
    },

    /// Blob not found in storage.
    #[error("attachment not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// Presign operation not supported by provider.
    #[error("signed URLs are not supported by the storage provider")]
    PresignNotSupported,

    /// Storage provider configuration error.
    #[error("vault configuration error: {0}")]
    Configuration(String),

    /// Storage operation error.
    #[error("vault operation failed: {0}")]
    Operation(String),
}

impl VaultError {
    /// Create a size exceeded error.
    #[must_use]
    pub fn size_exceeded(size: u64, max: u64) -> Self {
        Self::SizeExceeded { size, max }
    }

    /// Create a forbidden error.
    #[must_use]
    pub fn forbidden(key: impl Into<String>) -> Self {
        Self::Forbidden { key: key.into() }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<opendal::Error> for VaultError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            opendal::ErrorKind::Unsupported => Self::PresignNotSupported,
            _ => Self::Operation(err.to_string()),
        }
    }
}

impl From<VaultError> for AppError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::SizeExceeded { size, max } => Self::PayloadTooLarge(format!(
                "attachment is {size} bytes, maximum is {max} bytes"
            )),
            VaultError::Forbidden { key } => Self::Forbidden(format!("attachment {key}")),
            VaultError::NotFound { key } => Self::NotFound(format!("attachment {key}")),
            VaultError::PresignNotSupported
            | VaultError::Configuration(_)
            | VaultError::Operation(_) => Self::Storage(err.to_string()),
        }
    }
}
