use crate::assets::{validate_key, AssetStore};
use crate::StorageError;
use bytes::Bytes;
use gallery_filesystem::FileSystem;
use std::path::PathBuf;

/// Asset store writing into a directory served by the gallery server itself
pub struct LocalAssetStore {
    dir: PathBuf,
    public_url: String,
}

impl LocalAssetStore {
    pub fn new(dir: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, key)
    }
}

#[async_trait::async_trait]
impl AssetStore for LocalAssetStore {
    async fn upload(&self, data: Bytes, _mime_type: &str, key: &str) -> Result<String, StorageError> {
        validate_key(key)?;
        let path = self.dir.join(key);

        FileSystem::write_atomic(&path, &data)
            .await
            .map_err(|e| StorageError::UploadError(key.to_string(), e.to_string()))?;

        tracing::debug!("Stored asset {} ({} bytes)", path.display(), data.len());
        Ok(self.url_for(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.dir.join(key);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Removed asset {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::AssetNotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::DeleteError(key.to_string(), e.to_string())),
        }
    }

    fn key_from_url(&self, url: &str) -> Option<String> {
        let key = match url.strip_prefix(&self.public_url) {
            Some(rest) => rest.trim_start_matches('/'),
            None => url.rsplit('/').next()?,
        };
        validate_key(key).ok().map(|_| key.to_string())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
