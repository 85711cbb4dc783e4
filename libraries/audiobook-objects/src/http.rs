//! Upload over HTTP `PUT`.

use crate::error::{ObjectStoreError, Result};
use async_trait::async_trait;
use audiobook_core::{keys, ObjectKey, ObjectStore};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default request timeout for a single upload
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Connection settings for [`HttpObjectStore`].
#[derive(Debug, Clone)]
pub struct HttpObjectStoreConfig {
    /// Base URL that keys are appended to for `PUT`
    pub endpoint: String,
    /// Base URL the stored objects are publicly served from
    pub public_base_url: String,
    /// Optional bearer token sent with every upload
    pub bearer_token: Option<String>,
    pub timeout: Duration,
}

impl HttpObjectStoreConfig {
    pub fn new(endpoint: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            public_base_url: public_base_url.into(),
            bearer_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Object store that uploads each blob with one `PUT` request.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    http: Client,
    endpoint: String,
    public_base_url: String,
    bearer_token: Option<String>,
}

impl HttpObjectStore {
    /// Create a store, validating both URLs.
    pub fn new(config: HttpObjectStoreConfig) -> Result<Self> {
        let endpoint = validate_url(&config.endpoint)?;
        let public_base_url = validate_url(&config.public_base_url)?;

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            endpoint,
            public_base_url,
            bearer_token: config.bearer_token,
        })
    }

    /// Upload `body` under `key` and return its public URL.
    pub async fn upload(&self, key: &ObjectKey, content_type: &str, body: Bytes) -> Result<String> {
        let url = format!("{}/{}", self.endpoint, key.as_str());
        let size = body.len();

        debug!(key = %key, size, "Uploading object");

        let mut request = self
            .http
            .put(&url)
            .header(CONTENT_TYPE, content_type)
            .body(body);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            info!(key = %key, size, "Object uploaded");
            Ok(keys::public_url(&self.public_base_url, key))
        } else {
            let message = response
                .text()
                .await
                .ok()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            Err(ObjectStoreError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put_object(
        &self,
        key: &ObjectKey,
        content_type: &str,
        body: Bytes,
    ) -> audiobook_core::Result<String> {
        Ok(self.upload(key, content_type, body).await?)
    }
}

pub(crate) fn validate_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ObjectStoreError::InvalidUrl("URL cannot be empty".to_string()));
    }

    let parsed = Url::parse(trimmed).map_err(|e| ObjectStoreError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ObjectStoreError::InvalidUrl(format!(
            "{trimmed}: scheme must be http or https"
        )));
    }

    Ok(trimmed.to_string())
}
