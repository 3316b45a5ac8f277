//! Stowage Core Library
//!
//! This crate provides the error taxonomy, configuration, and shared types
//! used across all stowage components.

pub mod config;
pub mod error;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
