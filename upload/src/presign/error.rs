//! Error types for presign operations

use aws_sdk_s3::{error::SdkError, operation::put_object::PutObjectError};
use thiserror::Error;

/// Result type for presign operations
pub type PresignResult<T> = Result<T, PresignError>;

/// Errors that can occur while presigning an upload
#[derive(Error, Debug)]
pub enum PresignError {
    /// S3 SDK failed to build or sign the request
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// Presigning configuration rejected, e.g. an out-of-range expiry
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<SdkError<PutObjectError>> for PresignError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        Self::S3Error(format!("Failed to generate presigned URL: {error}"))
    }
}
