use gallery_config::UploadSettings;
use gallery_models::FilePayload;
use thiserror::Error;

/// 10 MiB, inclusive
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const DEFAULT_ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Which files may enter an upload batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    allowed_mime_types: Vec<String>,
    max_file_size: u64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("unsupported file type '{0}'")]
    UnsupportedType(String),

    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub file_name: String,
    pub reason: RejectionReason,
}

/// Files split by the policy, in their original order
#[derive(Debug, Default)]
pub struct Screened {
    pub accepted: Vec<FilePayload>,
    pub rejected: Vec<Rejection>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_MIME_TYPES, DEFAULT_MAX_FILE_SIZE)
    }
}

impl From<&UploadSettings> for UploadPolicy {
    fn from(settings: &UploadSettings) -> Self {
        Self::new(settings.allowed_mime_types.iter().map(String::as_str), settings.max_file_size_bytes())
    }
}

impl UploadPolicy {
    pub fn new<'a>(allowed_mime_types: impl IntoIterator<Item = &'a str>, max_file_size: u64) -> Self {
        Self {
            allowed_mime_types: allowed_mime_types
                .into_iter()
                .map(|m| m.trim().to_ascii_lowercase())
                .collect(),
            max_file_size,
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn allowed_mime_types(&self) -> &[String] {
        &self.allowed_mime_types
    }

    pub fn check(&self, mime_type: &str, size: u64) -> Result<(), RejectionReason> {
        let mime = mime_type.trim().to_ascii_lowercase();
        if !self.allowed_mime_types.contains(&mime) {
            return Err(RejectionReason::UnsupportedType(mime_type.to_string()));
        }
        if size > self.max_file_size {
            return Err(RejectionReason::TooLarge {
                size,
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    pub fn accepts(&self, mime_type: &str, size: u64) -> bool {
        self.check(mime_type, size).is_ok()
    }

    pub fn screen(&self, files: Vec<FilePayload>) -> Screened {
        let mut screened = Screened::default();
        for file in files {
            match self.check(&file.mime_type, file.size()) {
                Ok(()) => screened.accepted.push(file),
                Err(reason) => screened.rejected.push(Rejection {
                    file_name: file.file_name,
                    reason,
                }),
            }
        }
        screened
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmp_is_rejected_at_any_size() {
        let policy = UploadPolicy::default();
        for size in [0, 1, 1024, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_FILE_SIZE + 1] {
            assert!(!policy.accepts("image/bmp", size));
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let policy = UploadPolicy::default();
        assert!(policy.accepts("image/png", 10_485_760));
        assert_eq!(
            policy.check("image/png", 10_485_761),
            Err(RejectionReason::TooLarge {
                size: 10_485_761,
                limit: 10_485_760
            })
        );
    }

    #[test]
    fn test_mime_match_ignores_case() {
        let policy = UploadPolicy::default();
        assert!(policy.accepts("IMAGE/JPEG", 10));
        assert!(policy.accepts(" image/gif ", 10));
    }

    #[test]
    fn test_screen_keeps_order_and_reasons() {
        let policy = UploadPolicy::default();
        let screened = policy.screen(vec![
            FilePayload::new("a.png", "image/png", vec![0u8; 4]),
            FilePayload::new("b.bmp", "image/bmp", vec![0u8; 4]),
            FilePayload::new("c.gif", "image/gif", vec![0u8; 4]),
        ]);

        let accepted: Vec<_> = screened.accepted.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(accepted, vec!["a.png", "c.gif"]);
        assert_eq!(
            screened.rejected,
            vec![Rejection {
                file_name: "b.bmp".to_string(),
                reason: RejectionReason::UnsupportedType("image/bmp".to_string()),
            }]
        );
    }

    #[test]
    fn test_from_settings() {
        let settings = UploadSettings {
            max_file_size_mb: 2,
            allowed_mime_types: vec!["image/webp".to_string()],
        };
        let policy = UploadPolicy::from(&settings);
        assert!(policy.accepts("image/webp", 2 * 1024 * 1024));
        assert!(!policy.accepts("image/png", 10));
    }
}
