use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{info, warn};

use super::error::StorageError;
use super::name::{backup_name, stored_name_for};
use super::traits::FileStore;

/// Filesystem-backed file store.
///
/// Files live flat under `base_path`; in-flight writes go to `{base_path}/.tmp`
/// and are renamed into place once complete.
pub struct FilesystemFileStore {
    base_path: PathBuf,
}

impl FilesystemFileStore {
    /// Create a new filesystem file store, creating the directory tree if needed.
    pub async fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Map a stored name onto the base directory, rejecting anything that is
    /// not a single plain path component.
    fn resolve(&self, stored_name: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(stored_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !stored_name.starts_with('.') => {
                Ok(self.base_path.join(stored_name))
            }
            _ => Err(StorageError::InvalidName(stored_name.to_string())),
        }
    }

    fn ensure_inside(&self, path: &Path) -> Result<(), StorageError> {
        let inside = path.parent() == Some(self.base_path.as_path())
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with('.'));
        if inside {
            Ok(())
        } else {
            Err(StorageError::InvalidName(path.display().to_string()))
        }
    }

    async fn remove_if_present(path: &Path) -> Result<bool, StorageError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl FileStore for FilesystemFileStore {
    async fn save(&self, data: &[u8], original_name: &str) -> Result<String, StorageError> {
        let stored_name = stored_name_for(original_name);
        let file_path = self.resolve(&stored_name)?;

        // The directory may have been removed since construction.
        fs::create_dir_all(self.base_path.join(".tmp")).await?;

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &file_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        info!(path = %file_path.display(), size = data.len(), "File saved");
        Ok(stored_name)
    }

    async fn backup(&self, stored_name: &str) -> Result<PathBuf, StorageError> {
        let original_path = self.resolve(stored_name)?;
        let backup_path = self.resolve(&backup_name(stored_name))?;

        match fs::rename(&original_path, &backup_path).await {
            Ok(()) => {
                info!(path = %backup_path.display(), "Backup created");
                Ok(backup_path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %original_path.display(), "File not found for backup");
                Ok(backup_path)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn restore(&self, backup_path: &Path, original_name: &str) -> Result<(), StorageError> {
        self.ensure_inside(backup_path)?;
        let original_path = self.resolve(original_name)?;

        if !fs::try_exists(backup_path).await? {
            warn!(path = %backup_path.display(), "Backup file not found for restoration");
            return Ok(());
        }

        if Self::remove_if_present(&original_path).await? {
            warn!(
                path = %original_path.display(),
                "Target file existed, removed it before restoring backup"
            );
        }

        fs::rename(backup_path, &original_path).await?;
        info!(path = %original_path.display(), "Backup restored");
        Ok(())
    }

    async fn delete(&self, stored_name: &str) -> Result<bool, StorageError> {
        let file_path = self.resolve(stored_name)?;
        let removed = Self::remove_if_present(&file_path).await?;
        if removed {
            info!(path = %file_path.display(), "File deleted");
        } else {
            warn!(path = %file_path.display(), "File not found for deletion");
        }
        Ok(removed)
    }

    async fn discard(&self, path: &Path) -> Result<bool, StorageError> {
        self.ensure_inside(path)?;
        let removed = Self::remove_if_present(path).await?;
        if removed {
            info!(path = %path.display(), "Backup discarded");
        }
        Ok(removed)
    }

    fn path(&self, stored_name: &str) -> Result<PathBuf, StorageError> {
        self.resolve(stored_name)
    }
}
