//! Artifact delivery through Apache OpenDAL.

use async_trait::async_trait;
use opendal::{Operator, services};
use tracing::{debug, info};

use projex_shared::ProjexResult;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;
use crate::export::Artifact;

/// Destination for finished export artifacts.
///
/// Returns the location the artifact can be retrieved from.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Delivers one artifact.
    async fn deliver(&self, artifact: &Artifact) -> ProjexResult<String>;
}

/// Storage service writing artifacts to the configured provider.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
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
                Operator::new(builder).map(|b| b.finish())
            }
            StorageProvider::LocalFs { root } => {
                let root = root
                    .to_str()
                    .ok_or_else(|| StorageError::configuration("invalid path"))?;
                Operator::new(services::Fs::default().root(root)).map(|b| b.finish())
            }
            StorageProvider::Memory => {
                Operator::new(services::Memory::default()).map(|b| b.finish())
            }
        };

        operator.map_err(|e| StorageError::configuration(e.to_string()))
    }

    /// Validate an artifact size against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is larger than allowed.
    pub fn validate_size(&self, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(size, self.config.max_file_size));
        }
        Ok(())
    }

    /// Storage key for an artifact filename.
    #[must_use]
    pub fn storage_key(&self, filename: &str) -> String {
        format!("{}{}", self.config.prefix, filename)
    }

    /// Write an artifact and return its storage key.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is too large or the write fails.
    pub async fn store(&self, artifact: &Artifact) -> Result<String, StorageError> {
        let size = u64::try_from(artifact.bytes.len()).unwrap_or(u64::MAX);
        self.validate_size(size)?;

        let key = self.storage_key(&artifact.filename);
        debug!(key = %key, size, content_type = artifact.content_type, "writing artifact");
        self.operator.write(&key, artifact.bytes.clone()).await?;

        info!(
            provider = self.provider_name(),
            key = %key,
            size,
            "artifact delivered"
        );
        Ok(key)
    }

    /// Read a stored artifact back.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact does not exist or cannot be read.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let buffer = self.operator.read(key).await?;
        Ok(buffer.to_vec())
    }

    /// Check if an artifact exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        self.operator.stat(key).await.is_ok()
    }

    /// Human-readable location of a stored key.
    #[must_use]
    pub fn location_of(&self, key: &str) -> String {
        format!("{}/{key}", self.config.provider.location().trim_end_matches('/'))
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

#[async_trait]
impl ArtifactSink for StorageService {
    async fn deliver(&self, artifact: &Artifact) -> ProjexResult<String> {
        let key = self.store(artifact).await?;
        Ok(self.location_of(&key))
    }
}
