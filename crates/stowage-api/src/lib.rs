//! Stowage API Library
//!
//! This crate provides the HTTP RPC surface for workspace content lifecycle
//! operations, plus application setup (storage, routes, server).

// Module declarations
mod api_doc;
mod handlers;
mod telemetry;

// Public modules
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
