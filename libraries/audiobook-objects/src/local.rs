/// Local object storage - keeps blobs on disk
use crate::error::{ObjectStoreError, Result};
use async_trait::async_trait;
use audiobook_core::{keys, ObjectKey, ObjectStore};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &ObjectKey) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for segment in key.segments() {
            if segment == "." || segment == ".." || segment.contains('\\') {
                return Err(ObjectStoreError::InvalidKey(key.to_string()));
            }
            path.push(segment);
        }
        if path == self.root {
            return Err(ObjectStoreError::InvalidKey(key.to_string()));
        }
        Ok(path)
    }

    /// Write a blob and return the public URL
    pub async fn store(&self, key: &ObjectKey, data: &[u8]) -> Result<String> {
        let path = self.path_for(key)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        debug!(key = %key, path = %path.display(), size = data.len(), "Stored object");

        Ok(keys::public_url(&self.public_base_url, key))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put_object(
        &self,
        key: &ObjectKey,
        _content_type: &str,
        body: Bytes,
    ) -> audiobook_core::Result<String> {
        Ok(self.store(key, &body).await?)
    }
}
