//! Storage provider configuration.

use std::fmt;

use imgvault_shared::StorageConfig;

/// Region name Cloudflare R2 expects from S3 clients.
const R2_REGION: &str = "auto";

/// Storage provider configuration.
#[derive(Clone)]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, AWS S3, MinIO
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// In-process storage (development and tests only)
    Memory,
}

impl StorageProvider {
    /// Create S3-compatible provider.
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

    /// Create a Cloudflare R2 provider for the given account.
    #[must_use]
    pub fn r2(
        account_id: &str,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self::s3(
            r2_endpoint(account_id),
            bucket,
            access_key_id,
            secret_access_key,
            R2_REGION,
        )
    }

    /// Create in-memory provider.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::Memory => "memory",
        }
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::Memory => "memory",
        }
    }
}

impl fmt::Debug for StorageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S3 {
                endpoint,
                bucket,
                access_key_id,
                region,
                ..
            } => f
                .debug_struct("S3")
                .field("endpoint", endpoint)
                .field("bucket", bucket)
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"<redacted>")
                .field("region", region)
                .finish(),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

impl From<&StorageConfig> for StorageProvider {
    fn from(config: &StorageConfig) -> Self {
        match &config.endpoint {
            Some(endpoint) => Self::s3(
                endpoint,
                &config.bucket,
                &config.access_key_id,
                &config.secret_access_key,
                R2_REGION,
            ),
            None => Self::r2(
                &config.account_id,
                &config.bucket,
                &config.access_key_id,
                &config.secret_access_key,
            ),
        }
    }
}

/// R2's S3 API endpoint for an account.
fn r2_endpoint(account_id: &str) -> String {
    format!("https://{account_id}.r2.cloudflarestorage.com")
}
