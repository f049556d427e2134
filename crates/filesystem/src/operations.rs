use super::models::FileSystem;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

impl FileSystem {
    /// Creates the asset directory and the folder holding the metadata file.
    pub async fn ensure_storage_structure(data_path: &str, assets_path: &str) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();

        let data_file = Self::get_absolute_path(Path::new(data_path))?;
        if let Some(parent) = data_file.parent() {
            if Self::create_directory(parent, "Metadata directory").await? {
                created.push(parent.to_path_buf());
            }
        }

        let assets = Self::get_absolute_path(Path::new(assets_path))?;
        if Self::create_directory(&assets, "Assets directory").await? {
            created.push(assets);
        }

        Ok(created)
    }

    /// Writes through a sibling temp file and renames it over the target,
    /// so readers never observe a half-written file.
    pub async fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut tmp_name = path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(content).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp_path, path).await
    }

    /// Returns `true` when the directory had to be created.
    async fn create_directory(path: &Path, description: &str) -> Result<bool> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
            tracing::debug!("    Created: {} ({})", path.display(), description);
            Ok(true)
        } else {
            tracing::debug!("    Exists:  {} ({})", path.display(), description);
            Ok(false)
        }
    }

    fn get_absolute_path(path: &Path) -> Result<PathBuf> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(abs_path)
    }

    pub fn get_absolute_path_string(path: &str) -> Result<String> {
        let path_buf = PathBuf::from(path);
        let abs = Self::get_absolute_path(&path_buf)?;
        Ok(abs.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_storage_structure_creates_folders_once() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("data/gallery.json");
        let assets = temp.path().join("data/assets");

        let created = FileSystem::ensure_storage_structure(
            data.to_str().unwrap(),
            assets.to_str().unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(created.len(), 2);
        assert!(assets.is_dir());

        let created_again = FileSystem::ensure_storage_structure(
            data.to_str().unwrap(),
            assets.to_str().unwrap(),
        )
        .await
        .unwrap();
        assert!(created_again.is_empty());
    }

    #[tokio::test]
    async fn test_write_atomic_replaces_content() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("nested/file.json");

        FileSystem::write_atomic(&target, b"first").await.unwrap();
        FileSystem::write_atomic(&target, b"second").await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"second");
        assert!(!temp.path().join("nested/file.json.tmp").exists());
    }
}
