use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use upload::presign::{
    PresignError, PresignResult, PresignedUpload, Presigner, PutObjectDescriptor,
};
use url::Url;

pub const FAKE_S3_HOST: &str = "s3.eu-west-1.amazonaws.com";

/// Presigner that shapes its output like a path-style S3 presign without signing
#[derive(Default)]
pub struct FakePresigner {
    calls: AtomicUsize,
    last: Mutex<Option<PutObjectDescriptor>>,
}

impl FakePresigner {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_descriptor(&self) -> Option<PutObjectDescriptor> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Presigner for FakePresigner {
    async fn presign(&self, descriptor: &PutObjectDescriptor) -> PresignResult<PresignedUpload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(descriptor.clone());

        let mut url = Url::parse(&format!(
            "https://{FAKE_S3_HOST}/{}/{}",
            descriptor.bucket, descriptor.key
        ))
        .map_err(|e| PresignError::S3Error(e.to_string()))?;

        let mut metadata_keys: Vec<String> = descriptor
            .metadata
            .keys()
            .map(|key| format!("x-amz-meta-{}", key.to_lowercase()))
            .collect();
        metadata_keys.sort();
        let signed_headers = ["cache-control", "content-type", "host"]
            .into_iter()
            .map(str::to_string)
            .chain(metadata_keys)
            .collect::<Vec<_>>()
            .join(";");

        url.query_pairs_mut()
            .append_pair("X-Amz-Algorithm", "AWS4-HMAC-SHA256")
            .append_pair("X-Amz-Credential", "XXXXXXXXXXXXXXX")
            .append_pair("X-Amz-Security-Token", "ZZZZZZZZZZZZZZZ")
            .append_pair("X-Amz-Signature", "YYYYYYYYYYYYYYY")
            .append_pair("X-Amz-Expires", "900")
            .append_pair("X-Amz-Date", "20220104T215629Z")
            .append_pair("X-Amz-SignedHeaders", &signed_headers);

        let mut headers: BTreeMap<String, String> = descriptor
            .metadata
            .iter()
            .map(|(key, value)| (format!("x-amz-meta-{}", key.to_lowercase()), value.clone()))
            .collect();
        headers.insert("content-type".to_string(), descriptor.content_type.clone());
        headers.insert("host".to_string(), FAKE_S3_HOST.to_string());
        if let Some(cache_control) = &descriptor.cache_control {
            headers.insert("cache-control".to_string(), cache_control.clone());
        }
        if let Some(content_md5) = &descriptor.content_md5 {
            headers.insert("content-md5".to_string(), content_md5.clone());
        }

        Ok(PresignedUpload {
            url: url.to_string(),
            headers,
            expires_at: Utc::now() + Duration::minutes(15),
        })
    }
}

/// Presigner that always fails
#[derive(Default)]
pub struct FailingPresigner {
    calls: AtomicUsize,
}

impl FailingPresigner {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Presigner for FailingPresigner {
    async fn presign(&self, _descriptor: &PutObjectDescriptor) -> PresignResult<PresignedUpload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PresignError::S3Error("signing credentials expired".to_string()))
    }
}
