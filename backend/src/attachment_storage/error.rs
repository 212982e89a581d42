//! Error types for attachment storage operations

use thiserror::Error;

/// Result type for attachment storage operations
pub type AttachmentStorageResult<T> = Result<T, AttachmentStorageError>;

/// Errors that can occur during attachment storage operations
#[derive(Error, Debug)]
pub enum AttachmentStorageError {
    /// Presigning configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failed to generate a presigned URL
    #[error("Failed to generate presigned URL: {0}")]
    PresignError(String),
}
