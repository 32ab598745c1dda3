//! Presigned upload URLs

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod error;
mod s3;

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use error::{PresignError, PresignResult};
pub use s3::S3Presigner;

/// Metadata key carrying the declared content type
pub const META_CONTENT_TYPE: &str = "contentType";
/// Metadata key carrying the uploader's identity hash
pub const META_USER_HASH: &str = "userHash";
/// Metadata key carrying the capture latitude
pub const META_LATITUDE: &str = "latitude";
/// Metadata key carrying the capture longitude
pub const META_LONGITUDE: &str = "longitude";
/// Metadata key carrying the location accuracy
pub const META_ACCURACY: &str = "accuracy";

/// Put-object request to presign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectDescriptor {
    /// Target bucket
    pub bucket: String,
    /// Object key within the bucket
    pub key: String,
    /// Declared content type
    pub content_type: String,
    /// `Cache-Control` stored with the object
    pub cache_control: Option<String>,
    /// Base64 MD5 digest the upload must match
    pub content_md5: Option<String>,
    /// User metadata stored with the object
    pub metadata: HashMap<String, String>,
}

/// Presigned URL and the headers the uploader has to replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUpload {
    /// The presigned URL for the PUT
    pub url: String,
    /// Signed headers, keyed by lower-case name
    pub headers: BTreeMap<String, String>,
    /// ISO-8601 UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Produces presigned PUT URLs
///
/// Implementations make a single attempt per call and never retry.
#[async_trait]
pub trait Presigner: Send + Sync {
    /// Presigns a put-object request
    ///
    /// # Errors
    ///
    /// Returns `PresignError` if the request cannot be signed
    async fn presign(&self, descriptor: &PutObjectDescriptor) -> PresignResult<PresignedUpload>;
}
