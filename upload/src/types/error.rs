//! Error taxonomy for a single upload invocation

use thiserror::Error;

use crate::presign::PresignError;

/// Result type for upload invocations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that abort an upload invocation
///
/// None of these produce a response body; they are handed back to the Lambda
/// runtime, which reports the invocation as failed.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Request body missing or not the expected JSON shape
    #[error("Failed to parse request body: {0}")]
    BodyParse(String),

    /// Authorizer claims missing or not the expected shape
    #[error("Failed to decode identity claims: {0}")]
    ClaimsDecode(String),

    /// No file extension is known for the declared content type
    #[error("Unsupported content type: {0:?}")]
    UnsupportedContentType(String),

    /// The presigner failed
    #[error(transparent)]
    Presign(#[from] PresignError),

    /// The response body could not be encoded
    #[error("Failed to serialize response: {0}")]
    ResponseSerialize(String),
}

impl UploadError {
    /// Whether the failure was caused by the caller's input
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::BodyParse(_) | Self::ClaimsDecode(_) | Self::UnsupportedContentType(_)
        )
    }
}
