use crate::keys;
use crate::traits::{
    DeleteObjectQuery, PresignedAccess, SignedUrlOptions, StorageError, StorageResult,
};
use crate::StorageBackend;
use async_trait::async_trait;
use futures::StreamExt;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStore, ObjectStoreExt, Result as ObjectResult};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// S3 presigned-access implementation
///
/// `object_store` binds one bucket per client, while this service addresses a
/// bucket per owner, so clients are built on demand and cached per bucket.
pub struct S3PresignedAccess {
    bucket_prefix: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    stores: RwLock<HashMap<String, AmazonS3>>,
}

impl S3PresignedAccess {
    /// Create a new S3PresignedAccess instance
    ///
    /// # Arguments
    /// * `bucket_prefix` - Prefix for per-owner bucket names
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(bucket_prefix: String, region: String, endpoint_url: Option<String>) -> Self {
        S3PresignedAccess {
            bucket_prefix,
            region,
            endpoint_url,
            stores: RwLock::new(HashMap::new()),
        }
    }

    /// Get or build the object store client for a bucket.
    async fn store_for(&self, bucket: &str) -> StorageResult<AmazonS3> {
        if let Some(store) = self.stores.read().await.get(bucket) {
            return Ok(store.clone());
        }

        // Build AmazonS3 object store from environment and explicit settings.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(self.region.clone())
            .with_bucket_name(bucket.to_string());

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let mut stores = self.stores.write().await;
        // A concurrent request may have built the same client; keep one.
        Ok(stores
            .entry(bucket.to_string())
            .or_insert(store)
            .clone())
    }

    /// Delete every object whose full key starts with `prefix`.
    ///
    /// `object_store` listing prefixes are path-segment based, so a raw
    /// string prefix like `workspaces/w1/trail-` cannot be passed to `list`
    /// directly. Instead the nearest enclosing path is listed and results are
    /// filtered by string prefix.
    async fn delete_prefix(&self, store: &AmazonS3, bucket: &str, prefix: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        let (list_path, needs_filter) = if let Some(stripped) = prefix.strip_suffix('/') {
            (Path::from(stripped), false)
        } else {
            let parent = prefix.rsplit_once('/').map(|(p, _)| p).unwrap_or("");
            (Path::from(parent), true)
        };

        let mut listing = store.list(Some(&list_path));
        let mut deleted = 0usize;

        while let Some(meta) = listing.next().await {
            let meta = meta.map_err(|e| StorageError::BackendError(e.to_string()))?;
            if needs_filter && !meta.location.as_ref().starts_with(prefix) {
                continue;
            }

            let result: ObjectResult<_> = store.delete(&meta.location).await;
            result.map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %meta.location,
                    prefix = %prefix,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 prefix delete failed"
                );
                match e {
                    ObjectStoreError::NotFound { .. } => {
                        StorageError::NotFound(meta.location.to_string())
                    }
                    other => StorageError::DeleteFailed(other.to_string()),
                }
            })?;
            deleted += 1;
        }

        if deleted == 0 {
            // Nothing matched; prefix deletion is best-effort.
            tracing::debug!(bucket = %bucket, prefix = %prefix, "no objects matched prefix");
            return Ok(());
        }

        tracing::info!(
            bucket = %bucket,
            prefix = %prefix,
            deleted,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 prefix delete successful"
        );

        Ok(())
    }
}

#[async_trait]
impl PresignedAccess for S3PresignedAccess {
    fn bucket(&self, owner_id: &str) -> String {
        keys::bucket_for(&self.bucket_prefix, owner_id)
    }

    fn backup_object(&self, workspace_id: &str, name: &str) -> String {
        keys::backup_object_key(workspace_id, name)
    }

    async fn sign_download(
        &self,
        bucket: &str,
        key: &str,
        options: &SignedUrlOptions,
    ) -> StorageResult<String> {
        let store = self.store_for(bucket).await?;
        let location = Path::from(key.to_string());

        // Signing is local; check existence first so absent objects surface
        // as NotFound instead of a URL that 404s later.
        match store.head(&location).await {
            Ok(_) => {}
            Err(ObjectStoreError::NotFound { .. }) => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(StorageError::BackendError(e.to_string())),
        }

        let url_result: ObjectResult<_> = store
            .signed_url(Method::GET, &location, options.expires_in)
            .await;

        let url = url_result
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    "S3 URL signing failed"
                );
                StorageError::SignFailed(e.to_string())
            })?
            .to_string();

        tracing::info!(
            bucket = %bucket,
            key = %key,
            expires_in_secs = options.expires_in.as_secs(),
            "S3 download URL signed"
        );

        Ok(url)
    }

    async fn delete_object(&self, bucket: &str, query: &DeleteObjectQuery) -> StorageResult<()> {
        let store = self.store_for(bucket).await?;

        match query {
            DeleteObjectQuery::Exact { name } => {
                let start = std::time::Instant::now();
                let location = Path::from(name.to_string());

                // S3 DeleteObject reports success for absent keys; check
                // existence first so repeated deletes surface as NotFound.
                match store.head(&location).await {
                    Ok(_) => {}
                    Err(ObjectStoreError::NotFound { .. }) => {
                        return Err(StorageError::NotFound(name.to_string()));
                    }
                    Err(e) => return Err(StorageError::BackendError(e.to_string())),
                }

                let result: ObjectResult<_> = store.delete(&location).await;

                result.map_err(|e| match e {
                    ObjectStoreError::NotFound { .. } => StorageError::NotFound(name.to_string()),
                    other => {
                        tracing::error!(
                            error = %other,
                            bucket = %bucket,
                            key = %name,
                            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                            "S3 delete failed"
                        );
                        StorageError::DeleteFailed(other.to_string())
                    }
                })?;

                tracing::info!(
                    bucket = %bucket,
                    key = %name,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete successful"
                );

                Ok(())
            }
            DeleteObjectQuery::Prefix { prefix } => {
                self.delete_prefix(&store, bucket, prefix).await
            }
        }
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        let store = self.store_for(bucket).await?;
        let location = Path::from(key.to_string());
        match store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
