use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::error::StorageError;

/// Name-addressed storage for uploaded files.
///
/// Only `save` treats problems as hard failures. Operations on a file that is
/// already gone are logged and reported through their return value instead.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist `data` under a freshly generated name derived from `original_name`.
    async fn save(&self, data: &[u8], original_name: &str) -> Result<String, StorageError>;

    /// Move the live file aside to `<name>.bak` and return the backup path.
    ///
    /// When the live file does not exist the would-be backup path is returned.
    async fn backup(&self, stored_name: &str) -> Result<PathBuf, StorageError>;

    /// Move a backup back over `original_name`, replacing anything already there.
    async fn restore(&self, backup_path: &Path, original_name: &str) -> Result<(), StorageError>;

    /// Delete a stored file. Returns `false` if it did not exist.
    async fn delete(&self, stored_name: &str) -> Result<bool, StorageError>;

    /// Delete a file returned by [`FileStore::backup`]. Returns `false` if it did not exist.
    async fn discard(&self, path: &Path) -> Result<bool, StorageError>;

    /// Absolute location of a stored file.
    fn path(&self, stored_name: &str) -> Result<PathBuf, StorageError>;
}
