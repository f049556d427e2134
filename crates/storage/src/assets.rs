use crate::StorageError;
use bytes::Bytes;

/// Bytes half of a storage backend: put an image somewhere addressable.
#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    /// Stores `data` under `key`, returns the public URL for it
    async fn upload(&self, data: Bytes, mime_type: &str, key: &str) -> Result<String, StorageError>;

    /// Removes the object stored under `key`
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Recovers the key from a URL this store produced.
    /// `None` means the URL owns no separately stored object.
    fn key_from_url(&self, url: &str) -> Option<String>;

    fn name(&self) -> &'static str;
}

/// Collision-resistant object key: `<unix-millis>-<8 hex>.<ext>`
pub fn generate_key(mime_type: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}.{}", millis, &suffix[..8], extension_for_mime(mime_type))
}

pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        other => mime_guess::get_mime_extensions_str(other)
            .and_then(|exts| exts.first().copied())
            .unwrap_or("bin"),
    }
}

/// Rejects keys that could escape the asset directory or bucket prefix
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.contains("..")
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0')
        || key.chars().nth(1) == Some(':');

    if invalid {
        tracing::warn!("Rejected asset key: {:?}", key);
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
