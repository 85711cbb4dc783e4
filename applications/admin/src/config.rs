/// Admin configuration
use crate::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "audiobook-admin.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_objects")]
    pub objects: ObjectSettings,

    #[serde(default = "default_embed")]
    pub embed: EmbedSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectBackend {
    Local,
    Http,
    S3,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectSettings {
    #[serde(default = "default_backend")]
    pub backend: ObjectBackend,

    /// Directory for the local backend
    #[serde(default = "default_object_root")]
    pub root: PathBuf,

    /// Upload endpoint for the HTTP backend, S3 API endpoint for the S3
    /// backend
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub bucket: Option<String>,

    /// Signing region; Cloudflare R2 uses `auto`
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub access_key_id: Option<String>,

    #[serde(default)]
    pub secret_access_key: Option<String>,

    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    #[serde(default)]
    pub bearer_token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbedSettings {
    /// Base URL of the site hosting the player
    #[serde(default = "default_embed_base_url")]
    pub base_url: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            objects: default_objects(),
            embed: default_embed(),
        }
    }
}

impl AdminConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `audiobook-admin.toml` is read
    /// if present. `AUDIOBOOK_<SECTION>__<KEY>` variables override both, e.g.
    /// `AUDIOBOOK_STORAGE__DATABASE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("AUDIOBOOK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| AdminError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AdminError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(AdminError::Config(
                "Database URL is required (set AUDIOBOOK_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.objects.public_base_url.trim().is_empty() {
            return Err(AdminError::Config(
                "Public base URL for objects is required".to_string(),
            ));
        }

        let objects = &self.objects;
        match objects.backend {
            ObjectBackend::Local => {}
            ObjectBackend::Http => {
                if !is_set(objects.endpoint.as_deref()) {
                    return Err(AdminError::Config(
                        "HTTP object backend needs an endpoint (set AUDIOBOOK_OBJECTS__ENDPOINT)"
                            .to_string(),
                    ));
                }
            }
            ObjectBackend::S3 => {
                let required = [
                    ("endpoint", objects.endpoint.as_deref()),
                    ("bucket", objects.bucket.as_deref()),
                    ("access_key_id", objects.access_key_id.as_deref()),
                    ("secret_access_key", objects.secret_access_key.as_deref()),
                ];
                if let Some((name, _)) = required.iter().find(|(_, value)| !is_set(*value)) {
                    return Err(AdminError::Config(format!(
                        "S3 object backend needs objects.{name} (set AUDIOBOOK_OBJECTS__{})",
                        name.to_uppercase()
                    )));
                }
            }
        }

        if self.embed.base_url.trim().is_empty() {
            return Err(AdminError::Config("Embed base URL is required".to_string()));
        }

        Ok(())
    }
}

fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/audiobooks.db".to_string()
}

fn default_objects() -> ObjectSettings {
    ObjectSettings {
        backend: default_backend(),
        root: default_object_root(),
        endpoint: None,
        bucket: None,
        region: default_region(),
        access_key_id: None,
        secret_access_key: None,
        public_base_url: default_public_base_url(),
        bearer_token: None,
        timeout_secs: default_timeout_secs(),
    }
}

fn default_backend() -> ObjectBackend {
    ObjectBackend::Local
}

fn default_object_root() -> PathBuf {
    PathBuf::from("./data/objects")
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/media".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_embed() -> EmbedSettings {
    EmbedSettings {
        base_url: default_embed_base_url(),
    }
}

fn default_embed_base_url() -> String {
    "http://localhost:5173".to_string()
}
