//! Storage service implementation using Apache OpenDAL.

use async_trait::async_trait;
use bytes::Bytes;
use opendal::{Operator, services};

use super::config::StorageProvider;
use super::error::StorageError;

/// Content type recorded when the upload does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Capability to persist a byte payload under a key.
///
/// The HTTP layer depends only on this trait.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `payload` under `key`, replacing any existing object.
    async fn put(&self, key: &str, payload: Bytes, content_type: &str)
    -> Result<(), StorageError>;
}

/// Storage service backed by an OpenDAL operator.
#[derive(Debug, Clone)]
pub struct StorageService {
    operator: Operator,
    provider_name: &'static str,
    bucket: String,
    supports_content_type: bool,
}

impl StorageService {
    /// Create a new storage service from a provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_provider(provider: &StorageProvider) -> Result<Self, StorageError> {
        let operator = Self::create_operator(provider)?;
        let supports_content_type = operator.info().full_capability().write_with_content_type;

        Ok(Self {
            operator,
            provider_name: provider.name(),
            bucket: provider.bucket().to_string(),
            supports_content_type,
        })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
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

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::Memory => Ok(Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish()),
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    #[cfg(test)]
    async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        Ok(self.operator.read(key).await?.to_vec())
    }
}

#[async_trait]
impl ObjectStore for StorageService {
    async fn put(
        &self,
        key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        check_key(key)?;

        // The whole payload goes out in one write; OpenDAL's put is atomic on S3.
        if self.supports_content_type {
            self.operator
                .write_with(key, payload)
                .content_type(content_type)
                .await?;
        } else {
            self.operator.write(key, payload).await?;
        }

        Ok(())
    }
}

/// Reject keys OpenDAL would rewrite before writing.
///
/// OpenDAL normalizes paths: surrounding whitespace is trimmed, a leading
/// `/` is dropped, `//` runs collapse and a trailing `/` names a directory.
/// Such a key would be stored under a different name than the one the
/// caller gets back, so it is refused instead.
fn check_key(key: &str) -> Result<(), StorageError> {
    let reason = if key.is_empty() {
        "key must not be empty"
    } else if key.trim() != key {
        "key must not start or end with whitespace"
    } else if key.starts_with('/') {
        "key must not start with '/'"
    } else if key.ends_with('/') {
        "key must not end with '/'"
    } else if key.contains("//") {
        "key must not contain '//'"
    } else {
        return Ok(());
    };

    Err(StorageError::InvalidKey(reason.to_string()))
}
