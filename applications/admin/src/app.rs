/// Wiring of stores and session for one CLI invocation
use crate::config::{AdminConfig, ObjectBackend};
use crate::error::{AdminError, Result};
use audiobook_core::{AudiobookStore, ObjectStore, SessionContext, TrackStore};
use audiobook_objects::{
    HttpObjectStore, HttpObjectStoreConfig, LocalObjectStore, S3ObjectStore, S3ObjectStoreConfig,
};
use audiobook_storage::SqliteStore;
use std::sync::Arc;
use std::time::Duration;

pub struct App {
    pub config: AdminConfig,
    pub store: Arc<SqliteStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub session: SessionContext,
}

impl App {
    /// Open the database, run migrations, set up object storage and load the
    /// session
    pub async fn connect(config: AdminConfig) -> Result<Self> {
        config.validate()?;

        if let Some(dir) = sqlite_parent_dir(&config.storage.database_url) {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| AdminError::Config(format!("Cannot create {}: {e}", dir.display())))?;
        }

        let pool = audiobook_storage::create_pool(&config.storage.database_url).await?;
        audiobook_storage::run_migrations(&pool).await?;
        let store = Arc::new(SqliteStore::new(pool));
        tracing::debug!("Database connected");

        let objects = object_store(&config)?;
        let session = SessionContext::get_or_create(store.as_ref()).await?;
        tracing::debug!(session = %session.session_id(), "Session ready");

        Ok(Self {
            config,
            store,
            objects,
            session,
        })
    }

    pub fn tracks(&self) -> Arc<dyn TrackStore> {
        self.store.clone()
    }

    pub fn audiobooks(&self) -> Arc<dyn AudiobookStore> {
        self.store.clone()
    }
}

/// Object store selected by the configuration
pub fn object_store(config: &AdminConfig) -> Result<Arc<dyn ObjectStore>> {
    let objects = &config.objects;
    match objects.backend {
        ObjectBackend::Local => Ok(Arc::new(LocalObjectStore::new(
            objects.root.clone(),
            objects.public_base_url.clone(),
        ))),
        ObjectBackend::Http => {
            let endpoint = objects
                .endpoint
                .clone()
                .ok_or_else(|| AdminError::Config("HTTP object backend needs an endpoint".to_string()))?;
            let mut http_config = HttpObjectStoreConfig::new(endpoint, objects.public_base_url.clone());
            http_config.timeout = Duration::from_secs(objects.timeout_secs);
            if let Some(token) = &objects.bearer_token {
                http_config = http_config.with_bearer_token(token.clone());
            }
            Ok(Arc::new(HttpObjectStore::new(http_config)?))
        }
        ObjectBackend::S3 => {
            let required = |value: &Option<String>, name: &str| {
                value
                    .clone()
                    .ok_or_else(|| AdminError::Config(format!("S3 object backend needs objects.{name}")))
            };
            let mut s3_config = S3ObjectStoreConfig::new(
                required(&objects.endpoint, "endpoint")?,
                required(&objects.bucket, "bucket")?,
                required(&objects.access_key_id, "access_key_id")?,
                required(&objects.secret_access_key, "secret_access_key")?,
                objects.public_base_url.clone(),
            )
            .with_region(objects.region.clone());
            s3_config.timeout = Duration::from_secs(objects.timeout_secs);
            Ok(Arc::new(S3ObjectStore::new(s3_config)?))
        }
    }
}

/// Directory holding a file-based SQLite database, if the URL names one
fn sqlite_parent_dir(database_url: &str) -> Option<std::path::PathBuf> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.starts_with(':') {
        return None;
    }
    std::path::Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(std::path::Path::to_path_buf)
}
