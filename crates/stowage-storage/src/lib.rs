//! Stowage Storage Library
//!
//! This crate provides the presigned-access storage abstraction and its
//! backends, plus the key addressing scheme shared by all of them.
//!
//! # Object key format
//!
//! Workspace content lives under owner-scoped buckets, one object tree per
//! workspace:
//!
//! - **Bucket**: `{bucket_prefix}-{owner_id}`
//! - **Default backup**: `workspaces/{workspace_id}/full-backup.tar`
//! - **Trail objects**: `workspaces/{workspace_id}/trail-{suffix}`
//! - **Workspace prefix** (for prefix deletes): `workspaces/{workspace_id}/`
//!
//! Key generation is centralized in the `keys` module so all backends stay
//! consistent. Prefixes used for deletion MUST end with a `/` separator
//! (see `keys::as_prefix`), otherwise a workspace id that is a string prefix
//! of another (`w1` vs `w10`) would match the wrong objects.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-memory")]
pub mod mem;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_presigned_access;
pub use keys::{DEFAULT_BACKUP, TRAIL_PREFIX};
#[cfg(feature = "storage-memory")]
pub use mem::InMemoryPresignedAccess;
#[cfg(feature = "storage-s3")]
pub use s3::S3PresignedAccess;
pub use stowage_core::StorageBackend;
pub use traits::{
    DeleteObjectQuery, PresignedAccess, SignedUrlOptions, StorageError, StorageResult,
};
