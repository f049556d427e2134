use crate::assets::{validate_key, AssetStore};
use crate::StorageError;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream, Client};
use bytes::Bytes;
use gallery_config::S3Settings;

/// S3-compatible asset store
/// Compatible with: Cloudflare R2, AWS S3, MinIO, DigitalOcean Spaces, etc.
pub struct S3AssetStore {
    client: Client,
    bucket_name: String,
    public_url: String,
    bucket_prefix: String,
}

impl S3AssetStore {
    pub async fn new(settings: &S3Settings) -> Result<Self, StorageError> {
        if settings.bucket_name.is_empty() {
            return Err(StorageError::ConfigError("s3.bucket_name is empty".to_string()));
        }
        if settings.public_url.trim().is_empty() {
            return Err(StorageError::ConfigError("s3.public_url is empty".to_string()));
        }

        let credentials = Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            None,
            None,
            "gallery-s3",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(settings.region.clone()));
        if !settings.endpoint_url.is_empty() {
            loader = loader.endpoint_url(settings.endpoint_url.clone());
        }
        let config = loader.load().await;

        Ok(Self {
            client: Client::new(&config),
            bucket_name: settings.bucket_name.clone(),
            public_url: settings.public_url.trim_end_matches('/').to_string(),
            bucket_prefix: settings.bucket_prefix.trim_matches('/').to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        if self.bucket_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.bucket_prefix, key)
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, self.build_key(key))
    }
}

#[async_trait::async_trait]
impl AssetStore for S3AssetStore {
    async fn upload(&self, data: Bytes, mime_type: &str, key: &str) -> Result<String, StorageError> {
        validate_key(key)?;
        let object_key = self.build_key(key);

        tracing::info!("Uploading {} to S3 bucket {}", object_key, self.bucket_name);

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&object_key)
            .content_type(mime_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::UploadError(object_key.clone(), e.to_string()))?;

        let url = self.url_for(key);
        tracing::info!("Upload complete: {}", url);

        Ok(url)
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let object_key = self.build_key(key);

        tracing::info!("Deleting {} from S3 bucket {}", object_key, self.bucket_name);

        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(&object_key)
            .send()
            .await
            .map_err(|e| StorageError::DeleteError(object_key.clone(), e.to_string()))?;

        tracing::info!("Delete complete: {}", object_key);
        Ok(())
    }

    fn key_from_url(&self, url: &str) -> Option<String> {
        let key = url.rsplit('/').next()?;
        validate_key(key).ok().map(|_| key.to_string())
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}
