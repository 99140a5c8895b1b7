//! Vault service implementation using Apache OpenDAL.

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use opendal::{ErrorKind, Operator, services};
use uuid::Uuid;

use super::error::VaultError;
use resourcehub_shared::config::{StorageProvider, VaultConfig};

/// Signed, time-bounded download URL for an attachment.
#[derive(Debug, Clone)]
pub struct SignedUrl {
    /// The signed URL.
    pub url: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
}

/// Per-owner attachment vault over a blob storage backend.
pub struct Vault {
    operator: Operator,
    config: VaultConfig,
}

impl Vault {
    /// Create a new vault from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: VaultConfig) -> Result<Self, VaultError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, VaultError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| VaultError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Operator::new(builder)
                    .map_err(|e| VaultError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| VaultError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| VaultError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }

    /// Maximum accepted attachment size in bytes.
    #[must_use]
    pub const fn max_attachment_size(&self) -> u64 {
        self.config.max_attachment_size
    }

    /// The storage provider name, for logging.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Generate a fresh key inside the owner's partition.
    ///
    /// The random component guarantees concurrent uploads never collide;
    /// the filename, when present, survives (sanitized) for display.
    #[must_use]
    pub fn generate_key(owner: Uuid, filename: Option<&str>) -> String {
        let random = Uuid::new_v4();
        match filename.map(sanitize_filename) {
            Some(name) if !name.is_empty() => format!("{owner}/{random}-{name}"),
            _ => format!("{owner}/{random}"),
        }
    }

    /// Check that a key lies inside the owner's partition.
    fn check_partition(owner: Uuid, key: &str) -> Result<(), VaultError> {
        let prefix = format!("{owner}/");
        if key.len() > prefix.len() && key.starts_with(&prefix) {
            Ok(())
        } else {
            Err(VaultError::forbidden(key))
        }
    }

    /// Upload an attachment into the owner's partition.
    ///
    /// The size gate runs before any write, so an oversized payload leaves
    /// no partial blob behind.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::SizeExceeded` when the payload is over the
    /// configured maximum, or a storage error when the write fails.
    pub async fn upload(
        &self,
        owner: Uuid,
        bytes: Bytes,
        content_type: &str,
        filename: Option<&str>,
    ) -> Result<String, VaultError> {
        let size = bytes.len() as u64;
        if size > self.config.max_attachment_size {
            return Err(VaultError::size_exceeded(
                size,
                self.config.max_attachment_size,
            ));
        }

        let key = Self::generate_key(owner, filename);
        self.operator
            .write_with(&key, bytes)
            .content_type(content_type)
            .await
            .map_err(VaultError::from)?;

        Ok(key)
    }

    /// Generate a signed download URL for a key in the owner's partition.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Forbidden` when the key is outside the owner's
    /// partition, or a storage error when presigning fails.
    pub async fn signed_url(&self, owner: Uuid, key: &str) -> Result<SignedUrl, VaultError> {
        Self::check_partition(owner, key)?;

        let ttl = Duration::from_secs(self.config.signed_url_ttl_secs);
        let presigned = self
            .operator
            .presign_read(key, ttl)
            .await
            .map_err(VaultError::from)?;

        Ok(SignedUrl {
            url: presigned.uri().to_string(),
            expires_at: Utc::now()
                + chrono::Duration::seconds(
                    i64::try_from(self.config.signed_url_ttl_secs).unwrap_or(i64::MAX),
                ),
        })
    }

    /// Delete an attachment from the owner's partition.
    ///
    /// Deleting an already-absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Forbidden` when the key is outside the owner's
    /// partition, or a storage error when deletion fails.
    pub async fn delete(&self, owner: Uuid, key: &str) -> Result<(), VaultError> {
        Self::check_partition(owner, key)?;

        match self.operator.delete(key).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Sanitize filename for storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_vault(max_size: u64) -> Vault {
        let root = std::env::temp_dir().join(format!("vault-test-{}", Uuid::new_v4()));
        let config =
            VaultConfig::new(StorageProvider::local_fs(root)).with_max_attachment_size(max_size);
        Vault::from_config(config).expect("should create vault")
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("notes.pdf"), "notes.pdf");
        assert_eq!(sanitize_filename("my file (1).pdf"), "my_file__1_.pdf");
        assert_eq!(sanitize_filename("test@#$%.doc"), "test____.doc");
    }

    #[test]
    fn test_generate_key_stays_in_partition() {
        let owner = Uuid::new_v4();

        let key = Vault::generate_key(owner, Some("notes.pdf"));
        assert!(key.starts_with(&format!("{owner}/")));
        assert!(key.ends_with("notes.pdf"));

        let bare = Vault::generate_key(owner, None);
        assert!(bare.starts_with(&format!("{owner}/")));
    }

    #[test]
    fn test_generate_key_is_collision_free() {
        let owner = Uuid::new_v4();
        let a = Vault::generate_key(owner, Some("notes.pdf"));
        let b = Vault::generate_key(owner, Some("notes.pdf"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_upload_over_limit_rejected() {
        let vault = temp_vault(16);
        let owner = Uuid::new_v4();

        let result = vault
            .upload(owner, Bytes::from(vec![0u8; 17]), "image/png", None)
            .await;

        assert!(matches!(
            result,
            Err(VaultError::SizeExceeded { size: 17, max: 16 })
        ));
    }

    #[tokio::test]
    async fn test_upload_at_limit_accepted() {
        let vault = temp_vault(16);
        let owner = Uuid::new_v4();

        let key = vault
            .upload(owner, Bytes::from(vec![0u8; 16]), "image/png", Some("a.png"))
            .await
            .expect("upload at the limit succeeds");

        assert!(key.starts_with(&format!("{owner}/")));
    }

    #[tokio::test]
    async fn test_signed_url_foreign_key_forbidden() {
        let vault = temp_vault(1024);
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        let result = vault.signed_url(owner, &format!("{other}/abc")).await;
        assert!(matches!(result, Err(VaultError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_signed_url_bare_partition_forbidden() {
        let vault = temp_vault(1024);
        let owner = Uuid::new_v4();

        // The partition prefix alone is not a valid key.
        let result = vault.signed_url(owner, &format!("{owner}/")).await;
        assert!(matches!(result, Err(VaultError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_delete_foreign_key_forbidden() {
        let vault = temp_vault(1024);
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        let result = vault.delete(owner, &format!("{other}/abc")).await;
        assert!(matches!(result, Err(VaultError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let vault = temp_vault(1024);
        let owner = Uuid::new_v4();

        let key = vault
            .upload(owner, Bytes::from_static(b"blob"), "text/plain", None)
            .await
            .expect("upload succeeds");

        vault.delete(owner, &key).await.expect("first delete");
        vault.delete(owner, &key).await.expect("repeat delete");
        vault
            .delete(owner, &format!("{owner}/never-existed"))
            .await
            .expect("absent key delete");
    }
}
