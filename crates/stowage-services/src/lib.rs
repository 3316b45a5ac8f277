//! Stowage Services Library
//!
//! Business services for workspace content lifecycle: presigned download URL
//! issuance and workspace content deletion, orchestrated over the abstract
//! presigned-access storage client.

pub mod workspace;

// Re-export commonly used types
pub use workspace::{DeleteScope, WorkspaceContentService};
