//! Identity claims attached by the upstream authorizer
//!
//! The authorizer has already verified the caller; these values are trusted as-is.

use std::collections::HashMap;

use lambda_http::{request::RequestContext, Request, RequestExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{UploadError, UploadResult};

/// Authorizer context key holding the caller's claims
pub const CLAIMS_KEY: &str = "claims";

/// Caller identity
///
/// Field names follow the authorizer's claim names. The stable caller identifier is
/// read from the plain `hash` claim; the older namespaced `custom:hash` is not read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentityClaims {
    /// Caller email address
    #[serde(rename = "email")]
    pub email: String,
    /// Caller display name
    #[serde(rename = "name")]
    pub name: String,
    /// Stable caller identifier
    #[serde(rename = "hash")]
    pub hash: String,
}

impl IdentityClaims {
    /// Decodes the claims a REST API authorizer attached to a request
    ///
    /// # Errors
    ///
    /// Returns `UploadError::ClaimsDecode` if the request did not come through an
    /// API Gateway REST integration or its claims do not decode
    pub fn from_request(request: &Request) -> UploadResult<Self> {
        match request.request_context_ref() {
            Some(RequestContext::ApiGatewayV1(context)) => {
                Self::from_authorizer(&context.authorizer.fields)
            }
            _ => Err(UploadError::ClaimsDecode(
                "request has no API Gateway REST authorizer context".to_string(),
            )),
        }
    }

    /// Decodes the claims from an authorizer context
    ///
    /// Every claim must be present as a string; extra claims are ignored.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::ClaimsDecode` if the claims are missing or any claim
    /// is absent or not a string
    pub fn from_authorizer(authorizer: &HashMap<String, Value>) -> UploadResult<Self> {
        let claims = authorizer.get(CLAIMS_KEY).ok_or_else(|| {
            UploadError::ClaimsDecode(format!("authorizer context has no {CLAIMS_KEY:?}"))
        })?;

        Self::deserialize(claims).map_err(|e| UploadError::ClaimsDecode(e.to_string()))
    }
}
