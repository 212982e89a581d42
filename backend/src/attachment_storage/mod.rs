//! S3-based attachment storage operations
//!
//! Attachments are stored under their todo id; this module never touches
//! the binary content itself, it only derives upload and download URLs.
mod error;

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::{presigning::PresigningConfig, Client as S3Client};
use chrono::{DateTime, Utc};

pub use error::{AttachmentStorageError, AttachmentStorageResult};

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL for PUT operations
    pub url: String,
    /// ISO-8601 UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Attachment storage client for S3 operations
///
/// Pure configuration plus an S3 client handle; holds no state between
/// calls.
pub struct AttachmentStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    presigned_url_expiry_secs: u64,
}

impl AttachmentStorage {
    /// Creates a new attachment storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for attachments
    /// * `presigned_url_expiry_secs` - Expiry time for presigned upload URLs in seconds
    #[must_use]
    pub const fn new(
        s3_client: Arc<S3Client>,
        bucket_name: String,
        presigned_url_expiry_secs: u64,
    ) -> Self {
        Self {
            s3_client,
            bucket_name,
            presigned_url_expiry_secs,
        }
    }

    /// Generates a presigned URL for uploading the attachment of a todo item
    ///
    /// The URL is scoped to the S3 key equal to the todo id and is minted
    /// fresh on every call; two calls for the same item yield two distinct
    /// but equivalent write URLs.
    ///
    /// # Errors
    ///
    /// Returns `AttachmentStorageError::ConfigError` if presigning config
    /// creation fails and `AttachmentStorageError::PresignError` if URL
    /// generation fails
    pub async fn generate_upload_url(&self, todo_id: &str) -> AttachmentStorageResult<PresignedUrl> {
        let presigned_config =
            PresigningConfig::expires_in(Duration::from_secs(self.presigned_url_expiry_secs))
                .map_err(|e| {
                    AttachmentStorageError::ConfigError(format!(
                        "Failed to create presigning config: {e}"
                    ))
                })?;

        let presigned_url = self
            .s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(todo_id)
            .presigned(presigned_config)
            .await
            .map_err(|e| AttachmentStorageError::PresignError(e.to_string()))?;

        let expires_at: DateTime<Utc> =
            Utc::now() + Duration::from_secs(self.presigned_url_expiry_secs);

        Ok(PresignedUrl {
            url: presigned_url.uri().to_string(),
            expires_at,
        })
    }

    /// Returns the stable public read URL of a todo item's attachment
    ///
    /// Plain URL templating over the bucket naming convention; no S3 call
    /// and no signing. Anyone who knows the bucket name and todo id can
    /// derive this URL.
    #[must_use]
    pub fn attachment_url(&self, todo_id: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{todo_id}", self.bucket_name)
    }
}
