/// Default values for configuration fields

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    60
}

pub fn max_body_size() -> usize {
    100
}

pub fn max_concurrent_requests() -> usize {
    1000
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn streaming_threshold_mb() -> u64 {
    16  // Assets larger than this are streamed instead of read into memory
}

pub fn enable_compression() -> bool {
    true
}

// Storage defaults
pub fn record_backend() -> super::models::RecordBackend {
    super::models::RecordBackend::Json
}

pub fn data_path() -> String {
    "data/gallery.json".to_string()
}

pub fn asset_backend() -> super::models::AssetBackend {
    super::models::AssetBackend::Local
}

pub fn assets_path() -> String {
    "data/assets".to_string()
}

pub fn assets_public_url() -> String {
    "http://localhost:8080/assets".to_string()
}

pub fn asset_settings() -> super::models::AssetSettings {
    super::models::AssetSettings {
        backend: asset_backend(),
        path: assets_path(),
        public_url: assets_public_url(),
    }
}

pub fn s3_region() -> String {
    "auto".to_string()
}

pub fn s3_bucket_name() -> String {
    "gallery-images".to_string()
}

pub fn s3_settings() -> super::models::S3Settings {
    super::models::S3Settings {
        enabled: false,
        endpoint_url: String::new(),
        region: s3_region(),
        access_key_id: String::new(),
        secret_access_key: String::new(),
        bucket_name: s3_bucket_name(),
        public_url: String::new(),
        bucket_prefix: String::new(),
    }
}

pub fn remote_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

pub fn remote_settings() -> super::models::RemoteSettings {
    super::models::RemoteSettings {
        base_url: remote_base_url(),
    }
}

pub fn storage_settings() -> super::models::StorageSettings {
    super::models::StorageSettings {
        backend: record_backend(),
        data_path: data_path(),
        assets: asset_settings(),
        s3: s3_settings(),
        remote: remote_settings(),
    }
}

// Upload defaults
pub fn max_file_size_mb() -> u64 {
    10
}

pub fn allowed_mime_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/gif".to_string(),
    ]
}

pub fn upload_settings() -> super::models::UploadSettings {
    super::models::UploadSettings {
        max_file_size_mb: max_file_size_mb(),
        allowed_mime_types: allowed_mime_types(),
    }
}

// Client defaults
pub fn request_timeout_secs() -> u64 {
    30
}

pub fn client_settings() -> super::models::ClientSettings {
    super::models::ClientSettings {
        request_timeout_secs: request_timeout_secs(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# Gallery Configuration
# ===============================================================================

[server]
# Network
host = "0.0.0.0"                     # Server bind address (0.0.0.0 = all interfaces)
port = 8080                          # Server port
base_url = "http://localhost:8080"   # Public base URL

# Performance
tcp_nodelay = true                   # Disable Nagle's algorithm (lower latency)
timeout_secs = 60                    # Request timeout in seconds
max_concurrent_requests = 1000       # Max simultaneous connections
max_body_size_mb = 100               # Max request body size in MB (batch uploads)
streaming_threshold_mb = 16          # Assets >16MB are streamed from disk
enable_compression = true            # HTTP compression (gzip/brotli/deflate)

# CORS
allowed_origins = ["*"]              # "*" = all origins | ["https://example.com"] for production

# ===============================================================================
# STORAGE BACKEND
# ===============================================================================
[storage]
backend = "json"                     # Metadata store: "json" | "memory" | "remote"
data_path = "data/gallery.json"      # Flat-file store location (backend = "json")

[storage.assets]
backend = "local"                    # Image store: "local" | "data_uri" | "s3"
path = "data/assets"                 # Directory for local image files
public_url = "http://localhost:8080/assets"  # URL prefix for local image files

# S3 Configuration (only used if storage.assets.backend = "s3")
[storage.s3]
enabled = false                      # Enable S3 storage backend
endpoint_url = ""                    # S3 endpoint (e.g., https://s3.amazonaws.com)
region = "auto"                      # S3 region (e.g., us-east-1 or "auto")
access_key_id = ""                   # AWS Access Key ID
secret_access_key = ""               # AWS Secret Access Key
bucket_name = "gallery-images"       # S3 bucket name
public_url = ""                      # Public URL prefix for stored images (required for s3 assets)
bucket_prefix = ""                   # Prefix for all S3 keys (optional)

# Remote gallery server (only used if storage.backend = "remote")
[storage.remote]
base_url = "http://localhost:8080/api"

# ===============================================================================
# UPLOADS
# ===============================================================================
[upload]
max_file_size_mb = 10                # Larger files are dropped from a batch
allowed_mime_types = ["image/jpeg", "image/png", "image/gif"]

[client]
request_timeout_secs = 30            # Per-call backend timeout (0 = none)
"#;
