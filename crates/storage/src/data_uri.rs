use crate::assets::AssetStore;
use crate::StorageError;
use base64::Engine;
use bytes::Bytes;

/// Inlines image bytes into the record as a `data:` URL.
///
/// Pairs with the memory record store for a fully self-contained setup;
/// nothing is stored separately, so deletes have nothing to do.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUriAssetStore;

impl DataUriAssetStore {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(data: &[u8], mime_type: &str) -> String {
        format!(
            "data:{};base64,{}",
            mime_type,
            base64::engine::general_purpose::STANDARD.encode(data)
        )
    }
}

#[async_trait::async_trait]
impl AssetStore for DataUriAssetStore {
    async fn upload(&self, data: Bytes, mime_type: &str, _key: &str) -> Result<String, StorageError> {
        Ok(Self::encode(&data, mime_type))
    }

    async fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn key_from_url(&self, _url: &str) -> Option<String> {
        None
    }

    fn name(&self) -> &'static str {
        "data_uri"
    }
}
