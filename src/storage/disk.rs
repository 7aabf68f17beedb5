use std::{
    io,
    path::{Path, PathBuf},
};

use super::TempStorage;
use crate::{StorageError, Token};

/// Builder for [`DiskTempStorage`].
#[derive(Debug, Clone)]
pub struct DiskTempStorageBuilder {
    root: PathBuf,
}

impl DiskTempStorageBuilder {
    /// Sets the directory under which token directories are created.
    pub fn destination(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Alias for [`DiskTempStorageBuilder::destination`].
    pub fn path(self, root: impl Into<PathBuf>) -> Self {
        self.destination(root)
    }

    /// Builds a validated disk storage backend.
    pub fn build(self) -> Result<DiskTempStorage, StorageError> {
        if self.root.as_os_str().is_empty() {
            return Err(StorageError::new("temp storage root path cannot be empty"));
        }

        Ok(DiskTempStorage { root: self.root })
    }
}

impl Default for DiskTempStorageBuilder {
    fn default() -> Self {
        Self {
            root: std::env::temp_dir().join("stashfield"),
        }
    }
}

/// Temporary storage keeping one directory per token under a root path.
#[derive(Debug, Clone)]
pub struct DiskTempStorage {
    root: PathBuf,
}

impl DiskTempStorage {
    /// Creates a disk storage builder.
    pub fn builder() -> DiskTempStorageBuilder {
        DiskTempStorageBuilder::default()
    }

    /// Returns the configured root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Removes the directory staged for `token` along with its files.
    ///
    /// Purging a token that has no directory is not an error.
    pub async fn purge(&self, token: &Token) -> Result<(), StorageError> {
        let dir = self.root.join(token.as_str());
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(token = %token, path = %dir.display(), "temp storage: purged");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::new(format!(
                "failed to purge temp directory: {err}"
            ))),
        }
    }
}

#[async_trait::async_trait]
impl TempStorage for DiskTempStorage {
    async fn temp_dir(&self, token: &Token) -> Result<PathBuf, StorageError> {
        let dir = self.root.join(token.as_str());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|err| StorageError::new(format!("failed to create temp directory: {err}")))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(token = %token, path = %dir.display(), "temp storage: resolved directory");

        Ok(dir)
    }
}

/// Reduces a client-supplied filename to a single path component.
///
/// Keeps the last component after either separator and drops control
/// characters. Spaces and non-ASCII characters are kept. Returns `None` when
/// nothing usable remains (empty, `.` or `..`).
pub fn safe_file_name(input: &str) -> Option<String> {
    // client filenames may use either separator regardless of host platform
    let base = input.rsplit(['/', '\\']).next().unwrap_or_default();
    let name: String = base.chars().filter(|ch| !ch.is_control()).collect();

    match name.as_str() {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}
