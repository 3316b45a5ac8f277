//! Application state shared by all handlers.

use std::sync::Arc;
use stowage_core::Config;
use stowage_services::WorkspaceContentService;
use stowage_storage::PresignedAccess;

/// Immutable per-process state: configuration, the workspace content service,
/// and the storage client handle. All fields are safe for concurrent use by
/// in-flight requests; no per-request state is kept here.
pub struct AppState {
    pub config: Config,
    pub workspace: WorkspaceContentService,
    pub storage: Arc<dyn PresignedAccess>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn PresignedAccess>) -> Self {
        let workspace = WorkspaceContentService::new(storage.clone());
        AppState {
            config,
            workspace,
            storage,
        }
    }
}
