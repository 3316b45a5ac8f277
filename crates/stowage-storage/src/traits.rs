//! Presigned-access storage abstraction
//!
//! This module defines the `PresignedAccess` trait that all storage backends
//! must implement, together with the error taxonomy they report. Only two
//! error categories matter to callers: "not found" and everything else; the
//! remaining variants exist for diagnostics.

use async_trait::async_trait;
use std::time::Duration;
use stowage_core::StorageBackend;
use thiserror::Error;

/// Default lifetime of issued download URLs.
pub const DEFAULT_URL_EXPIRY: Duration = Duration::from_secs(3600);

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Sign failed: {0}")]
    SignFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// Whether this error means the target object or prefix was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Options passed through when signing a download URL.
///
/// The content type is advisory: downloaded workspace content has no
/// predictable type ahead of time, so callers typically pass the wildcard
/// variant and the backend does not constrain the response type.
#[derive(Debug, Clone)]
pub struct SignedUrlOptions {
    pub content_type: String,
    pub expires_in: Duration,
}

impl SignedUrlOptions {
    /// Wildcard content type with the default expiry.
    pub fn wildcard() -> Self {
        SignedUrlOptions {
            content_type: "*/*".to_string(),
            expires_in: DEFAULT_URL_EXPIRY,
        }
    }
}

/// Target of a delete call: one exact object, or every object whose key
/// starts with a raw string prefix.
///
/// Prefix matching is plain string matching on full object keys, not
/// path-segment matching. This is what allows `workspaces/{ws}/trail-` to
/// cover `workspaces/{ws}/trail-0`, `trail-1`, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteObjectQuery {
    Exact { name: String },
    Prefix { prefix: String },
}

/// Presigned-access storage client.
///
/// All backends must honor the same error semantics:
///
/// - `sign_download` on an absent object reports `NotFound` (existence is
///   checked before signing; signing itself is local and would otherwise
///   always succeed).
/// - `delete_object` with an `Exact` query on an absent object reports
///   `NotFound`. This makes a repeated delete observable as `NotFound`
///   rather than a silent no-op.
/// - `delete_object` with a `Prefix` query matching zero objects succeeds:
///   prefix deletion is best-effort and there is nothing left to delete.
///   Trail objects in particular are optional, so their absence is not an
///   error.
#[async_trait]
pub trait PresignedAccess: Send + Sync {
    /// Bucket holding the given owner's workspace content.
    fn bucket(&self, owner_id: &str) -> String;

    /// Object key of a workspace's backup object; with an empty `name`, the
    /// bare workspace root (see `keys::backup_object_key`).
    fn backup_object(&self, workspace_id: &str, name: &str) -> String;

    /// Issue a time-limited download URL for an existing object.
    async fn sign_download(
        &self,
        bucket: &str,
        key: &str,
        options: &SignedUrlOptions,
    ) -> StorageResult<String>;

    /// Delete one object or every object under a prefix.
    async fn delete_object(&self, bucket: &str, query: &DeleteObjectQuery) -> StorageResult<()>;

    /// Check if an object exists.
    async fn object_exists(&self, bucket: &str, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
