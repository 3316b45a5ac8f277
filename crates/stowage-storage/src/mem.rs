use crate::keys;
use crate::traits::{
    DeleteObjectQuery, PresignedAccess, SignedUrlOptions, StorageError, StorageResult,
};
use crate::StorageBackend;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// In-memory presigned-access implementation
///
/// Holds per-bucket key sets behind a lock. Used for development and as the
/// backend of integration tests; it honors the same error semantics as the
/// S3 backend, including raw string prefix matching and `NotFound` on
/// zero-match deletes.
pub struct InMemoryPresignedAccess {
    bucket_prefix: String,
    /// bucket name -> (object key -> object size)
    buckets: RwLock<HashMap<String, BTreeMap<String, usize>>>,
}

impl InMemoryPresignedAccess {
    pub fn new(bucket_prefix: impl Into<String>) -> Self {
        InMemoryPresignedAccess {
            bucket_prefix: bucket_prefix.into(),
            buckets: RwLock::new(HashMap::new()),
        }
    }

    /// Insert an object. Creates the bucket on first use.
    pub fn put_object(&self, bucket: &str, key: &str, size: usize) {
        let mut buckets = self.buckets.write().expect("bucket lock poisoned");
        buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), size);
    }

    /// Snapshot of the object keys currently in a bucket, in key order.
    pub fn object_keys(&self, bucket: &str) -> Vec<String> {
        let buckets = self.buckets.read().expect("bucket lock poisoned");
        buckets
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PresignedAccess for InMemoryPresignedAccess {
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
        let buckets = self.buckets.read().expect("bucket lock poisoned");
        let exists = buckets
            .get(bucket)
            .map(|objects| objects.contains_key(key))
            .unwrap_or(false);
        if !exists {
            return Err(StorageError::NotFound(key.to_string()));
        }

        Ok(format!(
            "memory://{}/{}?expires_in={}",
            bucket,
            key,
            options.expires_in.as_secs()
        ))
    }

    async fn delete_object(&self, bucket: &str, query: &DeleteObjectQuery) -> StorageResult<()> {
        let mut buckets = self.buckets.write().expect("bucket lock poisoned");
        let objects = buckets.get_mut(bucket);

        match query {
            DeleteObjectQuery::Exact { name } => {
                let removed = objects
                    .map(|objects| objects.remove(name).is_some())
                    .unwrap_or(false);
                if !removed {
                    return Err(StorageError::NotFound(name.to_string()));
                }
                Ok(())
            }
            DeleteObjectQuery::Prefix { prefix } => {
                // Zero matches is fine; prefix deletion is best-effort.
                if let Some(objects) = objects {
                    objects.retain(|key, _| !key.starts_with(prefix.as_str()));
                }
                Ok(())
            }
        }
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        let buckets = self.buckets.read().expect("bucket lock poisoned");
        Ok(buckets
            .get(bucket)
            .map(|objects| objects.contains_key(key))
            .unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryPresignedAccess {
        let storage = InMemoryPresignedAccess::new("test-ws");
        let bucket = storage.bucket("u1");
        storage.put_object(&bucket, "workspaces/w1/full-backup.tar", 10);
        storage.put_object(&bucket, "workspaces/w1/trail-0", 1);
        storage.put_object(&bucket, "workspaces/w10/full-backup.tar", 10);
        storage
    }

    #[tokio::test]
    async fn exact_delete_of_absent_object_is_not_found() {
        let storage = seeded();
        let bucket = storage.bucket("u1");
        let err = storage
            .delete_object(
                &bucket,
                &DeleteObjectQuery::Exact {
                    name: "workspaces/w2/full-backup.tar".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn prefix_delete_matches_raw_string_prefix() {
        let storage = seeded();
        let bucket = storage.bucket("u1");
        storage
            .delete_object(
                &bucket,
                &DeleteObjectQuery::Prefix {
                    prefix: "workspaces/w1/trail-".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(
            storage.object_keys(&bucket),
            vec![
                "workspaces/w1/full-backup.tar".to_string(),
                "workspaces/w10/full-backup.tar".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn prefix_delete_with_zero_matches_succeeds() {
        let storage = seeded();
        let bucket = storage.bucket("u1");
        storage
            .delete_object(
                &bucket,
                &DeleteObjectQuery::Prefix {
                    prefix: "workspaces/w2/".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(storage.object_keys(&bucket).len(), 3);
    }

    #[tokio::test]
    async fn normalized_workspace_prefix_spares_sibling_workspace() {
        let storage = seeded();
        let bucket = storage.bucket("u1");
        storage
            .delete_object(
                &bucket,
                &DeleteObjectQuery::Prefix {
                    prefix: "workspaces/w1/".to_string(),
                },
            )
            .await
            .unwrap();
        // w10 shares the "w1" string prefix but not the normalized one.
        assert_eq!(
            storage.object_keys(&bucket),
            vec!["workspaces/w10/full-backup.tar".to_string()]
        );
    }

    #[tokio::test]
    async fn sign_download_requires_existing_object() {
        let storage = seeded();
        let bucket = storage.bucket("u1");
        let url = storage
            .sign_download(
                &bucket,
                "workspaces/w1/full-backup.tar",
                &SignedUrlOptions::wildcard(),
            )
            .await
            .unwrap();
        assert!(!url.is_empty());

        let err = storage
            .sign_download(&bucket, "workspaces/w9/full-backup.tar", &SignedUrlOptions::wildcard())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
