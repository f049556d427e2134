use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerSettings,
    #[serde(default = "super::defaults::storage_settings")]
    pub storage: StorageSettings,
    #[serde(default = "super::defaults::upload_settings")]
    pub upload: UploadSettings,
    #[serde(default = "super::defaults::client_settings")]
    pub client: ClientSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub base_url: String,
    #[serde(default = "super::defaults::tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::max_body_size")]
    pub max_body_size_mb: usize,
    #[serde(default = "super::defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "super::defaults::max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "super::defaults::streaming_threshold_mb")]
    pub streaming_threshold_mb: u64,
    #[serde(default = "super::defaults::enable_compression")]
    pub enable_compression: bool,
}

/// Where gallery metadata lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordBackend {
    /// Flat JSON file on disk
    Json,
    /// In-process key/value map, lost on restart
    Memory,
    /// Another gallery server reached over HTTP
    Remote,
}

/// Where image bytes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetBackend {
    Local,
    DataUri,
    S3,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "super::defaults::record_backend")]
    pub backend: RecordBackend,
    #[serde(default = "super::defaults::data_path")]
    pub data_path: String,
    #[serde(default = "super::defaults::asset_settings")]
    pub assets: AssetSettings,
    #[serde(default = "super::defaults::s3_settings")]
    pub s3: S3Settings,
    #[serde(default = "super::defaults::remote_settings")]
    pub remote: RemoteSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetSettings {
    #[serde(default = "super::defaults::asset_backend")]
    pub backend: AssetBackend,
    #[serde(default = "super::defaults::assets_path")]
    pub path: String,
    #[serde(default = "super::defaults::assets_public_url")]
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Settings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub endpoint_url: String,
    #[serde(default = "super::defaults::s3_region")]
    pub region: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default = "super::defaults::s3_bucket_name")]
    pub bucket_name: String,
    #[serde(default)]
    pub public_url: String,
    #[serde(default)]
    pub bucket_prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteSettings {
    #[serde(default = "super::defaults::remote_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    #[serde(default = "super::defaults::max_file_size_mb")]
    pub max_file_size_mb: u64,
    #[serde(default = "super::defaults::allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientSettings {
    /// Per-call backend timeout, 0 disables it
    #[serde(default = "super::defaults::request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl UploadSettings {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        (self.request_timeout_secs > 0).then(|| std::time::Duration::from_secs(self.request_timeout_secs))
    }
}

impl RecordBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordBackend::Json => "json",
            RecordBackend::Memory => "memory",
            RecordBackend::Remote => "remote",
        }
    }
}
