//! Caller-declared upload metadata

use serde::{Deserialize, Serialize};

use crate::types::{UploadError, UploadResult};

/// Location where the image was captured
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Gps {
    /// Latitude in decimal degrees
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(default)]
    pub longitude: f64,
    /// Horizontal accuracy in meters
    #[serde(default)]
    pub accuracy: f64,
}

/// Body of an upload request
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadataRequest {
    /// MIME type of the object that will be uploaded
    #[serde(default)]
    pub content_type: String,
    /// Base64 MD5 digest the client will send as `Content-MD5`
    #[serde(default, rename = "contentMD5", skip_serializing_if = "Option::is_none")]
    pub content_md5: Option<String>,
    /// Capture location, zeroed when absent
    #[serde(default)]
    pub gps: Gps,
}

impl UploadMetadataRequest {
    /// Parses a request body
    ///
    /// Unknown fields are ignored and missing fields take their zero value.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::BodyParse` if the body is empty or not a JSON object
    /// of the expected shape
    pub fn from_body(body: &[u8]) -> UploadResult<Self> {
        serde_json::from_slice(body).map_err(|e| UploadError::BodyParse(e.to_string()))
    }

    /// Content-MD5 to sign, ignoring empty values
    #[must_use]
    pub fn content_md5(&self) -> Option<&str> {
        self.content_md5.as_deref().filter(|md5| !md5.is_empty())
    }
}
