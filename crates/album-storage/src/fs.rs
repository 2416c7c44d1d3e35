//! Filesystem-backed blob store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::instrument;

use album_core::traits::{BlobStore, RepoResult};
use album_core::DomainError;

/// Blob store over a local directory
///
/// A blob key maps to a file path under `root`; `public_url` joins the key
/// onto `public_base_url`, which is where the HTTP layer (or a fronting CDN)
/// serves the same directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsBlobStore {
    /// Create a new store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Create from the shared storage configuration
    pub fn from_config(config: &album_common::StorageConfig) -> Self {
        Self::new(&config.media_dir, &config.public_base_url)
    }

    /// Resolve a key to its on-disk path, rejecting traversal attempts
    fn resolve(&self, key: &str) -> RepoResult<PathBuf> {
        if key.is_empty() || key.starts_with('/') {
            return Err(DomainError::StorageError(format!("invalid blob key: {key}")));
        }
        if Path::new(key)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(DomainError::StorageError(format!("invalid blob key: {key}")));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    async fn put(&self, key: &str, bytes: &[u8]) -> RepoResult<()> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::StorageError(e.to_string()))?;
        }

        fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch(&self, key: &str) -> RepoResult<Vec<u8>> {
        let path = self.resolve(key)?;

        fs::read(&path)
            .await
            .map_err(|e| DomainError::StorageError(format!("{key}: {e}")))
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> RepoResult<()> {
        let path = self.resolve(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Already gone counts as deleted
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::StorageError(e.to_string())),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }
}
