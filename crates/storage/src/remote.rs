use crate::backend::StorageBackend;
use crate::StorageError;
use bytes::Bytes;
use gallery_models::{Category, GalleryItem, GalleryItemPatch, NewGalleryItem};
use reqwest::{header, Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

/// Body of the asset endpoints: returned by upload, sent by removal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUrl {
    pub url: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Storage backend living in another gallery server, reached over its JSON API
pub struct RemoteBackend {
    client: Client,
    base_url: Url,
}

impl RemoteBackend {
    /// `base_url` points at the API root, e.g. `http://localhost:8080/api`
    pub fn new(base_url: &str) -> Result<Self, StorageError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, StorageError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StorageError::ConfigError(format!("remote base_url '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::ConfigError(format!(
                "remote base_url '{}' cannot carry a path",
                base_url
            )));
        }
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StorageError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::ConfigError(format!("remote base_url '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turns a non-success status into the matching storage error
    async fn check(response: Response, missing: impl FnOnce() -> StorageError) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.error.message,
            Err(_) => status.to_string(),
        };
        tracing::debug!("Remote backend answered {}: {}", status, message);

        Err(match status {
            StatusCode::NOT_FOUND => missing(),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => StorageError::InvalidRecord(message),
            _ => StorageError::HttpError(format!("{}: {}", status, message)),
        })
    }

    fn unexpected_missing(url: &Url) -> StorageError {
        StorageError::HttpError(format!("404 Not Found: {}", url))
    }
}

#[async_trait::async_trait]
impl StorageBackend for RemoteBackend {
    async fn list(&self, category: Option<Category>) -> Result<Vec<GalleryItem>, StorageError> {
        let url = self.endpoint(&["gallery"])?;
        let mut request = self.client.get(url.clone());
        if let Some(category) = category {
            request = request.query(&[("category", category.as_str())]);
        }

        let response = Self::check(request.send().await?, || Self::unexpected_missing(&url)).await?;
        Ok(response.json().await?)
    }

    async fn get(&self, id: &str) -> Result<Option<GalleryItem>, StorageError> {
        let url = self.endpoint(&["gallery", id])?;
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check(response, || StorageError::NotFound(id.to_string())).await?;
        Ok(Some(response.json().await?))
    }

    async fn insert(&self, item: NewGalleryItem) -> Result<GalleryItem, StorageError> {
        let url = self.endpoint(&["gallery"])?;
        let response = self.client.post(url.clone()).json(&item).send().await?;
        let response = Self::check(response, || Self::unexpected_missing(&url)).await?;
        Ok(response.json().await?)
    }

    async fn insert_many(&self, items: Vec<NewGalleryItem>) -> Result<Vec<GalleryItem>, StorageError> {
        let url = self.endpoint(&["gallery", "bulk"])?;
        let response = self.client.post(url.clone()).json(&items).send().await?;
        let response = Self::check(response, || Self::unexpected_missing(&url)).await?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: &str, patch: GalleryItemPatch) -> Result<GalleryItem, StorageError> {
        let url = self.endpoint(&["gallery", id])?;
        let response = self.client.put(url).json(&patch).send().await?;
        let response = Self::check(response, || StorageError::NotFound(id.to_string())).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let url = self.endpoint(&["gallery", id])?;
        let response = self.client.delete(url).send().await?;
        Self::check(response, || StorageError::NotFound(id.to_string())).await?;
        Ok(())
    }

    async fn upload_asset(&self, data: Bytes, mime_type: &str) -> Result<String, StorageError> {
        let url = self.endpoint(&["assets"])?;
        let response = self
            .client
            .post(url.clone())
            .header(header::CONTENT_TYPE, mime_type)
            .body(data)
            .send()
            .await?;
        let response = Self::check(response, || Self::unexpected_missing(&url)).await?;
        let asset: AssetUrl = response.json().await?;
        Ok(asset.url)
    }

    async fn remove_asset(&self, url: &str) -> Result<(), StorageError> {
        let endpoint = self.endpoint(&["assets"])?;
        let body = AssetUrl { url: url.to_string() };
        let response = self.client.delete(endpoint).json(&body).send().await?;
        Self::check(response, || StorageError::AssetNotFound(url.to_string())).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let backend = RemoteBackend::new("http://localhost:8080/api/").unwrap();
        assert_eq!(
            backend.endpoint(&["gallery", "abc"]).unwrap().as_str(),
            "http://localhost:8080/api/gallery/abc"
        );

        let backend = RemoteBackend::new("http://localhost:8080/api").unwrap();
        assert_eq!(
            backend.endpoint(&["gallery", "a/b"]).unwrap().as_str(),
            "http://localhost:8080/api/gallery/a%2Fb"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(
            RemoteBackend::new("not a url"),
            Err(StorageError::ConfigError(_))
        ));
        assert!(matches!(
            RemoteBackend::new("mailto:someone@example.org"),
            Err(StorageError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        let backend = RemoteBackend::new("http://127.0.0.1:9/api").unwrap();
        assert!(matches!(backend.list(None).await, Err(StorageError::HttpError(_))));
    }
}
