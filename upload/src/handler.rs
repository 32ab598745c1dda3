//! Upload request handler

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use lambda_http::{
    http::{header::CONTENT_TYPE, HeaderValue},
    Body, Request, Response,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    claims::IdentityClaims,
    extension::resolve_extension,
    object_key::ObjectKey,
    presign::{
        PresignedUpload, Presigner, PutObjectDescriptor, META_ACCURACY, META_CONTENT_TYPE,
        META_LATITUDE, META_LONGITUDE, META_USER_HASH,
    },
    request::UploadMetadataRequest,
    types::{UploadError, UploadResult},
};

/// Uploaded images are immutable, so clients may cache them for a year
pub const CACHE_CONTROL: &str = "max-age=31557600";

/// Body returned for a presigned upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Presigned URL to PUT the image to
    pub url: String,
    /// Upload id, the object key without its extension
    pub id: String,
    /// Identity hash of the uploader
    pub hash: String,
    /// Headers the client must send with its PUT
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// Handles presigned upload requests
///
/// Built once at startup and shared by every invocation.
pub struct UploadHandler {
    bucket: String,
    presigner: Arc<dyn Presigner>,
}

impl UploadHandler {
    /// Creates a handler issuing URLs for `bucket`
    #[must_use]
    pub fn new(bucket: impl Into<String>, presigner: Arc<dyn Presigner>) -> Self {
        Self {
            bucket: bucket.into(),
            presigner,
        }
    }

    /// Bucket receiving the uploads
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Issues a presigned upload URL for an API Gateway request
    ///
    /// # Errors
    ///
    /// - `UploadError::BodyParse` - Missing or malformed body
    /// - `UploadError::ClaimsDecode` - Authorizer claims missing or malformed
    /// - `UploadError::UnsupportedContentType` - No extension for the content type
    /// - `UploadError::Presign` - The presigner failed
    /// - `UploadError::ResponseSerialize` - The response body could not be encoded
    #[instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
    pub async fn handle(&self, request: Request) -> UploadResult<Response<Body>> {
        let result = self.create_upload(&request).await.and_then(|upload| {
            serde_json::to_string(&upload)
                .map_err(|e| UploadError::ResponseSerialize(e.to_string()))
        });

        match &result {
            Err(err) if err.is_client_error() => tracing::warn!("Upload rejected: {err}"),
            Err(err) => tracing::error!("Upload failed: {err}"),
            Ok(_) => {}
        }

        let mut response = Response::new(Body::from(result?));
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(response)
    }

    /// Runs the upload pipeline up to the response body
    ///
    /// # Errors
    ///
    /// See [`UploadHandler::handle`]
    pub async fn create_upload(&self, request: &Request) -> UploadResult<UploadResponse> {
        let metadata_request = UploadMetadataRequest::from_body(request.body())?;
        let claims = IdentityClaims::from_request(request)?;
        let extension = resolve_extension(&metadata_request.content_type)?;

        let object_key = ObjectKey::generate(extension);
        let descriptor = self.put_descriptor(&object_key, &metadata_request, &claims);

        tracing::info!("Presigning upload {} for user {}", object_key, claims.hash);

        let PresignedUpload {
            url,
            headers,
            expires_at,
        } = self.presigner.presign(&descriptor).await?;

        tracing::debug!("Presigned URL for {} expires at: {}", object_key, expires_at);

        Ok(UploadResponse {
            url,
            id: object_key.id(),
            hash: claims.hash,
            headers,
        })
    }

    fn put_descriptor(
        &self,
        object_key: &ObjectKey,
        request: &UploadMetadataRequest,
        claims: &IdentityClaims,
    ) -> PutObjectDescriptor {
        PutObjectDescriptor {
            bucket: self.bucket.clone(),
            key: object_key.to_string(),
            content_type: request.content_type.clone(),
            cache_control: Some(CACHE_CONTROL.to_string()),
            content_md5: request.content_md5().map(str::to_string),
            metadata: object_metadata(request, claims),
        }
    }
}

/// User metadata stored alongside the object
///
/// Floats use the shortest representation that round-trips, so `4.595696` is
/// stored as `"4.595696"` and `0.0` as `"0"`. Exponent notation is never used.
#[must_use]
pub fn object_metadata(
    request: &UploadMetadataRequest,
    claims: &IdentityClaims,
) -> HashMap<String, String> {
    HashMap::from([
        (META_CONTENT_TYPE.to_string(), request.content_type.clone()),
        (META_USER_HASH.to_string(), claims.hash.clone()),
        (META_LATITUDE.to_string(), request.gps.latitude.to_string()),
        (META_LONGITUDE.to_string(), request.gps.longitude.to_string()),
        (META_ACCURACY.to_string(), request.gps.accuracy.to_string()),
    ])
}
