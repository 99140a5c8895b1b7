//! Application configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Auth token validation configuration.
    pub auth: AuthConfig,
    /// Attachment vault configuration.
    #[serde(default)]
    pub vault: VaultConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Auth token validation configuration.
///
/// Token issuance belongs to the external authentication provider; the
/// service only validates bearer tokens signed with this secret.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret key used to validate bearer tokens.
    pub jwt_secret: String,
    /// Token lifetime in seconds, used when minting tokens in tests/dev.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
}

fn default_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Blob storage provider configuration for the attachment vault.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, Supabase, AWS S3
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
    /// Azure Blob Storage
    AzureBlob {
        /// Azure storage account name.
        account: String,
        /// Azure storage access key.
        access_key: String,
        /// Azure container name.
        container: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider (Cloudflare R2, Supabase, AWS S3).
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create Azure Blob Storage provider.
    #[must_use]
    pub fn azure_blob(
        account: impl Into<String>,
        access_key: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self::AzureBlob {
            account: account.into(),
            access_key: access_key.into(),
            container: container.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::AzureBlob { .. } => "azure_blob",
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Attachment vault configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct VaultConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum attachment size in bytes.
    #[serde(default = "default_max_attachment_size")]
    pub max_attachment_size: u64,
    /// Signed download URL TTL in seconds.
    #[serde(default = "default_signed_url_ttl")]
    pub signed_url_ttl_secs: u64,
}

fn default_max_attachment_size() -> u64 {
    VaultConfig::DEFAULT_MAX_ATTACHMENT_SIZE
}

fn default_signed_url_ttl() -> u64 {
    VaultConfig::DEFAULT_SIGNED_URL_TTL
}

impl VaultConfig {
    /// Default max attachment size: 5MB.
    pub const DEFAULT_MAX_ATTACHMENT_SIZE: u64 = 5 * 1024 * 1024;
    /// Default signed URL TTL: 1 hour.
    pub const DEFAULT_SIGNED_URL_TTL: u64 = 3600;

    /// Create a new vault config with default limits.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_attachment_size: Self::DEFAULT_MAX_ATTACHMENT_SIZE,
            signed_url_ttl_secs: Self::DEFAULT_SIGNED_URL_TTL,
        }
    }

    /// Set maximum attachment size.
    #[must_use]
    pub fn with_max_attachment_size(mut self, size: u64) -> Self {
        self.max_attachment_size = size;
        self
    }

    /// Set signed URL TTL.
    #[must_use]
    pub fn with_signed_url_ttl(mut self, secs: u64) -> Self {
        self.signed_url_ttl_secs = secs;
        self
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self::new(StorageProvider::local_fs("./data/vault"))
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RESOURCEHUB").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_provider_s3() {
        let provider = StorageProvider::s3(
            "https://account.r2.cloudflarestorage.com",
            "attachments",
            "access_key",
            "secret_key",
            "auto",
        );
        assert_eq!(provider.name(), "s3");
    }

    #[test]
    fn test_storage_provider_local() {
        let provider = StorageProvider::local_fs("./vault");
        assert_eq!(provider.name(), "local");
    }

    #[test]
    fn test_vault_config_defaults() {
        let config = VaultConfig::new(StorageProvider::local_fs("./vault"));
        assert_eq!(
            config.max_attachment_size,
            VaultConfig::DEFAULT_MAX_ATTACHMENT_SIZE
        );
        assert_eq!(
            config.signed_url_ttl_secs,
            VaultConfig::DEFAULT_SIGNED_URL_TTL
        );
    }

    #[test]
    fn test_vault_config_builders() {
        let config = VaultConfig::new(StorageProvider::local_fs("./vault"))
            .with_max_attachment_size(1024)
            .with_signed_url_ttl(60);
        assert_eq!(config.max_attachment_size, 1024);
        assert_eq!(config.signed_url_ttl_secs, 60);
    }
}
