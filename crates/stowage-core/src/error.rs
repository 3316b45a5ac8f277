//! Error types module
//!
//! This module provides the core error types used throughout the stowage
//! application. All service-level errors are unified under the `AppError`
//! enum, and `ErrorMetadata` drives how each error is presented over the RPC
//! surface (status code, machine-readable code, log level).

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait allows errors to self-describe their response characteristics.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried by the caller)
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Target object or prefix absent in storage.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other storage-layer failure (network, permission, backend
    /// internal error). Surfaced to callers with the UNKNOWN code.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::NotFound(_) => 404,
            AppError::InvalidInput(_) => 400,
            AppError::Storage(_)
            | AppError::Config(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            // Storage failures other than NotFound are opaque to callers.
            AppError::Storage(_) => "UNKNOWN",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Storage failures may be transient; retries are the caller's
        // responsibility, never performed here.
        matches!(self, AppError::Storage(_))
    }

    fn client_message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Storage(msg) => msg.clone(),
            AppError::Config(_) => "Service misconfigured".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::NotFound(_) | AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::Storage(_) => LogLevel::Error,
            AppError::Config(_) => LogLevel::Error,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }
}
