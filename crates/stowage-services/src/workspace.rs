//! Workspace content service
//!
//! Orchestrates presigned-URL issuance and deletion against the abstract
//! storage client and maps storage errors into the service taxonomy:
//! `NotFound` for absent targets, `Storage` (surfaced as UNKNOWN) for
//! everything else. Each request is handled statelessly; the service never
//! retries and never reports a partial success.

use std::sync::Arc;
use stowage_core::AppError;
use stowage_storage::{
    keys, DeleteObjectQuery, PresignedAccess, SignedUrlOptions, StorageError, DEFAULT_BACKUP,
    TRAIL_PREFIX,
};

/// Scope of a workspace content deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    /// Delete exactly the default backup object plus its trail-prefixed
    /// siblings.
    SingleBackup,
    /// Delete every object under the workspace's full prefix.
    AllSnapshots,
}

impl DeleteScope {
    pub fn from_include_snapshots(include_snapshots: bool) -> Self {
        if include_snapshots {
            DeleteScope::AllSnapshots
        } else {
            DeleteScope::SingleBackup
        }
    }
}

/// Progress of the two-step single-backup delete sequence. The two deletes
/// are not transactional: a trail failure after `DefaultDeleted` leaves the
/// primary backup gone while trail objects remain, and that state is
/// surfaced as-is rather than masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SingleBackupStep {
    Start,
    DefaultDeleted,
    TrailDeleted,
}

#[derive(Clone)]
pub struct WorkspaceContentService {
    storage: Arc<dyn PresignedAccess>,
}

impl WorkspaceContentService {
    pub fn new(storage: Arc<dyn PresignedAccess>) -> Self {
        Self { storage }
    }

    /// Both identifiers must be non-empty before any storage call.
    fn validate_identity(owner_id: &str, workspace_id: &str) -> Result<(), AppError> {
        if owner_id.trim().is_empty() {
            return Err(AppError::InvalidInput("owner_id must not be empty".to_string()));
        }
        if workspace_id.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "workspace_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Issue a time-limited download URL for a workspace's backup content.
    #[tracing::instrument(
        skip(self),
        fields(
            owner_id = %owner_id,
            workspace_id = %workspace_id,
            operation = "download_url_workspace"
        )
    )]
    pub async fn download_url(
        &self,
        owner_id: &str,
        workspace_id: &str,
    ) -> Result<String, AppError> {
        Self::validate_identity(owner_id, workspace_id)?;

        let blob_name = self.storage.backup_object(workspace_id, DEFAULT_BACKUP);
        let bucket = self.storage.bucket(owner_id);

        // Downloaded content type is not predictable ahead of time.
        self.storage
            .sign_download(&bucket, &blob_name, &SignedUrlOptions::wildcard())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %blob_name, "error signing download URL");
                map_storage_err(e)
            })
    }

    /// Delete the content of a single workspace.
    #[tracing::instrument(
        skip(self),
        fields(
            owner_id = %owner_id,
            workspace_id = %workspace_id,
            include_snapshots = matches!(scope, DeleteScope::AllSnapshots),
            operation = "delete_workspace"
        )
    )]
    pub async fn delete_workspace(
        &self,
        owner_id: &str,
        workspace_id: &str,
        scope: DeleteScope,
    ) -> Result<(), AppError> {
        Self::validate_identity(owner_id, workspace_id)?;

        let bucket = self.storage.bucket(owner_id);
        match scope {
            DeleteScope::AllSnapshots => self.delete_all_snapshots(&bucket, workspace_id).await,
            DeleteScope::SingleBackup => self.delete_single_backup(&bucket, workspace_id).await,
        }
    }

    /// One prefix delete covering everything under the workspace root. The
    /// prefix is normalized to end with a separator so a sibling workspace
    /// whose id shares a string prefix is never touched.
    async fn delete_all_snapshots(&self, bucket: &str, workspace_id: &str) -> Result<(), AppError> {
        let prefix = keys::as_prefix(&self.storage.backup_object(workspace_id, ""));

        self.storage
            .delete_object(
                bucket,
                &DeleteObjectQuery::Prefix {
                    prefix: prefix.clone(),
                },
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, prefix = %prefix, "error deleting workspace content");
                map_storage_err(e)
            })
    }

    /// Two sequential dependent deletes: the default backup object first,
    /// then its trail-prefixed siblings. A step-1 failure aborts before the
    /// trail is touched; a step-2 failure is surfaced with the already
    /// partially-completed state left in place.
    async fn delete_single_backup(&self, bucket: &str, workspace_id: &str) -> Result<(), AppError> {
        let mut step = SingleBackupStep::Start;

        let blob_name = self.storage.backup_object(workspace_id, DEFAULT_BACKUP);
        self.storage
            .delete_object(
                bucket,
                &DeleteObjectQuery::Exact {
                    name: blob_name.clone(),
                },
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    step = ?step,
                    key = %blob_name,
                    "error deleting workspace backup"
                );
                map_storage_err(e)
            })?;
        step = SingleBackupStep::DefaultDeleted;

        let trail_prefix = self.storage.backup_object(workspace_id, TRAIL_PREFIX);
        self.storage
            .delete_object(
                bucket,
                &DeleteObjectQuery::Prefix {
                    prefix: trail_prefix.clone(),
                },
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    step = ?step,
                    prefix = %trail_prefix,
                    "error deleting workspace backup trail"
                );
                map_storage_err(e)
            })?;
        step = SingleBackupStep::TrailDeleted;

        debug_assert_eq!(step, SingleBackupStep::TrailDeleted);
        Ok(())
    }
}

/// The storage client distinguishes exactly two outcomes relevant here.
fn map_storage_err(e: StorageError) -> AppError {
    match e {
        StorageError::NotFound(target) => AppError::NotFound(target),
        other => AppError::Storage(other.to_string()),
    }
}
