//! Storage setup and initialization

use anyhow::Result;
use std::sync::Arc;
use stowage_core::Config;
use stowage_storage::{create_presigned_access, PresignedAccess};

/// Setup the presigned-access storage client from configuration.
pub fn setup_storage(config: &Config) -> Result<Arc<dyn PresignedAccess>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_presigned_access(config)?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket_prefix = %config.bucket_prefix(),
        "Storage abstraction initialized successfully"
    );

    Ok(storage)
}
