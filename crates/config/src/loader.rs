use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::errors::ConfigError;
use super::migration::migrate_config_if_needed;
use super::models::{AssetBackend, Config, RecordBackend};
use std::path::Path;
use std::sync::Arc;

impl Config {
    /// Loads configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::from_file_with_events(path, None).await
    }

    /// Loads configuration from a file with optional event bus for notifications
    pub async fn from_file_with_events<P: AsRef<Path>>(
        path: P,
        events: Option<&Arc<gallery_events::EventBus>>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();

        // Create default config if it doesn't exist
        if !path.exists() {
            create_default_config(path).await?;
        }

        // Migrate config if needed
        migrate_config_if_needed(path, events).await?;

        // Read and parse config
        let content = tokio::fs::read_to_string(path).await?;
        let config = Self::from_toml(&content)?;

        Ok(config)
    }

    /// Parses and validates configuration text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.upload.max_file_size_mb == 0 {
            return Err(ConfigError::InvalidConfig(
                "upload.max_file_size_mb must be greater than 0".to_string(),
            ));
        }
        if self.upload.allowed_mime_types.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "upload.allowed_mime_types must not be empty".to_string(),
            ));
        }
        if self.storage.backend == RecordBackend::Remote && self.storage.remote.base_url.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "storage.remote.base_url is required for the remote backend".to_string(),
            ));
        }
        if self.storage.backend != RecordBackend::Remote
            && self.storage.assets.backend == AssetBackend::S3
            && !self.storage.s3.enabled
        {
            return Err(ConfigError::InvalidConfig(
                "S3 asset backend selected but storage.s3.enabled = false".to_string(),
            ));
        }
        if self.storage.backend != RecordBackend::Remote
            && self.storage.assets.backend == AssetBackend::S3
            && self.storage.s3.public_url.trim().is_empty()
        {
            return Err(ConfigError::InvalidConfig(
                "storage.s3.public_url is required for the S3 asset backend".to_string(),
            ));
        }
        Ok(())
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_gets_default_template() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let config = Config::from_file(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, RecordBackend::Json);
        assert_eq!(config.storage.assets.backend, AssetBackend::Local);
        assert_eq!(config.upload.max_file_size_bytes(), 10 * 1024 * 1024);
        assert_eq!(config.upload.allowed_mime_types.len(), 3);
        assert_eq!(
            config.client.request_timeout(),
            Some(std::time::Duration::from_secs(30))
        );
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = Config::from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            base_url = "http://127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.data_path, "data/gallery.json");
        assert_eq!(config.upload.max_file_size_mb, 10);
        assert!(config.server.allowed_origins.contains(&"*".to_string()));
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = Config::from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            base_url = "http://127.0.0.1:9000"

            [client]
            request_timeout_secs = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.client.request_timeout(), None);
    }

    #[test]
    fn test_s3_assets_require_enabled_flag() {
        let result = Config::from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            base_url = "http://127.0.0.1:9000"

            [storage.assets]
            backend = "s3"
            "#,
        );

        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_s3_assets_require_public_url() {
        let result = Config::from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            base_url = "http://127.0.0.1:9000"

            [storage.assets]
            backend = "s3"

            [storage.s3]
            enabled = true
            bucket_name = "gallery"
            "#,
        );

        match result {
            Err(ConfigError::InvalidConfig(msg)) => assert!(msg.contains("public_url")),
            other => panic!("expected InvalidConfig, got {:?}", other.map(|_| ())),
        }
    }
}
