#[cfg(feature = "storage-memory")]
use crate::InMemoryPresignedAccess;
#[cfg(feature = "storage-s3")]
use crate::S3PresignedAccess;
use crate::{PresignedAccess, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use stowage_core::Config;

/// Create a presigned-access client based on configuration
pub fn create_presigned_access(config: &Config) -> StorageResult<Arc<dyn PresignedAccess>> {
    let backend = config.storage_backend().unwrap_or(StorageBackend::S3);

    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config
                .s3_region()
                .map(String::from)
                .or_else(|| config.aws_region().map(String::from))
                .ok_or_else(|| {
                    StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
                })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage =
                S3PresignedAccess::new(config.bucket_prefix().to_string(), region, endpoint);
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => Ok(Arc::new(InMemoryPresignedAccess::new(
            config.bucket_prefix(),
        ))),

        #[cfg(not(feature = "storage-memory"))]
        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Memory storage backend not available (storage-memory feature not enabled)"
                .to_string(),
        )),
    }
}
