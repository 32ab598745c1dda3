//! S3-backed presigner

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, Client as S3Client};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{PresignError, PresignResult, PresignedUpload, Presigner, PutObjectDescriptor};

/// Presigns uploads with the S3 SDK
///
/// Signing happens locally; no request is sent to S3.
pub struct S3Presigner {
    s3_client: Arc<S3Client>,
    presigned_url_expiry_secs: u64,
}

impl S3Presigner {
    /// Creates a new presigner
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `presigned_url_expiry_secs` - Validity of issued URLs in seconds
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, presigned_url_expiry_secs: u64) -> Self {
        Self {
            s3_client,
            presigned_url_expiry_secs,
        }
    }
}

#[async_trait]
impl Presigner for S3Presigner {
    /// Generates a presigned URL for a PUT of the described object
    ///
    /// # Errors
    ///
    /// Returns `PresignError::ConfigError` if the expiry is out of range
    /// Returns `PresignError::S3Error` if the SDK fails to sign the request
    async fn presign(&self, descriptor: &PutObjectDescriptor) -> PresignResult<PresignedUpload> {
        let expiry = Duration::from_secs(self.presigned_url_expiry_secs);

        let presigned_config = PresigningConfig::expires_in(expiry).map_err(|e| {
            PresignError::ConfigError(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned_request = self
            .s3_client
            .put_object()
            .bucket(&descriptor.bucket)
            .key(&descriptor.key)
            .content_type(&descriptor.content_type)
            .set_cache_control(descriptor.cache_control.clone())
            .set_content_md5(descriptor.content_md5.clone())
            .set_metadata(Some(descriptor.metadata.clone()))
            .presigned(presigned_config)
            .await?;

        let headers = presigned_request
            .headers()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
            .collect();

        let expires_at: DateTime<Utc> = Utc::now() + expiry;

        debug!(
            "Presigned PUT for {}/{} expires at: {}",
            descriptor.bucket, descriptor.key, expires_at
        );

        Ok(PresignedUpload {
            url: presigned_request.uri().to_string(),
            headers,
            expires_at,
        })
    }
}
