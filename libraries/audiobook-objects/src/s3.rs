//! Upload to S3-compatible buckets (AWS S3, Cloudflare R2, MinIO).

use crate::error::{ObjectStoreError, Result};
use crate::http::{validate_url, DEFAULT_TIMEOUT_SECS};
use async_trait::async_trait;
use audiobook_core::{keys, ObjectKey, ObjectStore};
use aws_credential_types::Credentials;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::timeout::TimeoutConfig;
use aws_sdk_s3::config::{BehaviorVersion, Region, RequestChecksumCalculation};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::time::Duration;
use tracing::{debug, info};

/// Region name Cloudflare R2 expects
pub const DEFAULT_REGION: &str = "auto";

/// Connection settings for [`S3ObjectStore`].
#[derive(Debug, Clone)]
pub struct S3ObjectStoreConfig {
    /// S3 API endpoint, e.g. `https://<account>.r2.cloudflarestorage.com`
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Base URL the bucket is publicly served from
    pub public_base_url: String,
    pub timeout: Duration,
}

impl S3ObjectStoreConfig {
    pub fn new(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            region: DEFAULT_REGION.to_string(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            public_base_url: public_base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

/// Object store that sends one signed `PutObject` per blob.
///
/// Requests use path-style addressing (`{endpoint}/{bucket}/{key}`).
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStore {
    /// Create a store, validating the endpoint and public base URL.
    pub fn new(config: S3ObjectStoreConfig) -> Result<Self> {
        let endpoint = validate_url(&config.endpoint)?;
        let public_base_url = validate_url(&config.public_base_url)?;

        let bucket = config.bucket.trim().to_string();
        if bucket.is_empty() {
            return Err(ObjectStoreError::InvalidBucket(config.bucket));
        }

        let credentials = Credentials::new(
            config.access_key_id,
            config.secret_access_key,
            None,
            None,
            "audiobook-admin",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            // R2 rejects the aws-chunked trailer checksums
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(config.timeout)
                    .build(),
            )
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket,
            public_base_url,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload `body` under `key` and return its public URL.
    pub async fn upload(&self, key: &ObjectKey, content_type: &str, body: Bytes) -> Result<String> {
        let size = body.len();
        debug!(bucket = %self.bucket, key = %key, size, "Uploading object");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .content_type(content_type)
            .content_length(size as i64)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(put_error)?;

        info!(bucket = %self.bucket, key = %key, size, "Object uploaded");
        Ok(keys::public_url(&self.public_base_url, key))
    }
}

fn put_error(err: SdkError<PutObjectError, HttpResponse>) -> ObjectStoreError {
    let message = DisplayErrorContext(&err).to_string();
    match err.raw_response() {
        Some(response) if matches!(err, SdkError::ServiceError(_)) => ObjectStoreError::Rejected {
            status: response.status().as_u16(),
            message,
        },
        _ => ObjectStoreError::S3(message),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        key: &ObjectKey,
        content_type: &str,
        body: Bytes,
    ) -> audiobook_core::Result<String> {
        Ok(self.upload(key, content_type, body).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> S3ObjectStoreConfig {
        S3ObjectStoreConfig::new(
            "https://account.r2.cloudflarestorage.com/",
            "audiobooks",
            "key-id",
            "secret",
            "https://cdn.example.com",
        )
    }

    #[test]
    fn region_defaults_to_auto() {
        assert_eq!(config().region, "auto");
        assert_eq!(config().with_region("eu-west-1").region, "eu-west-1");
    }

    #[test]
    fn blank_bucket_is_rejected() {
        let mut config = config();
        config.bucket = "  ".to_string();
        assert!(matches!(
            S3ObjectStore::new(config),
            Err(ObjectStoreError::InvalidBucket(_))
        ));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let mut config = config();
        config.endpoint = "not a url".to_string();
        assert!(matches!(
            S3ObjectStore::new(config),
            Err(ObjectStoreError::InvalidUrl(_))
        ));
    }
}
