use std::{
    io,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Capability exposed by the upload mechanism for a not-yet-persisted file.
#[async_trait::async_trait]
pub trait UploadHandle: Send + Sized {
    /// Returns `true` when the upload completed and can be moved.
    fn is_valid(&self) -> bool;

    /// Returns the filename reported by the client.
    fn original_name(&self) -> &str;

    /// Returns the location the upload mechanism spooled the file to.
    fn source_path(&self) -> &Path;

    /// Moves the upload to `target`, the full path of the staged file.
    ///
    /// The parent of `target` is the directory handed out by temp storage.
    /// Ownership of the file transfers to the destination.
    async fn move_to(self, target: &Path) -> io::Result<()>;
}

/// File spooled to disk by the upload mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    path: PathBuf,
    original_name: String,
    content_type: mime::Mime,
    complete: bool,
}

impl UploadedFile {
    /// Wraps an already spooled file.
    pub fn new(path: impl Into<PathBuf>, original_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            original_name: original_name.into(),
            content_type: mime::APPLICATION_OCTET_STREAM,
            complete: true,
        }
    }

    /// Writes `body` to a fresh file under `dir` and wraps it.
    pub async fn spool(
        dir: impl AsRef<Path>,
        original_name: impl Into<String>,
        body: impl Into<Bytes>,
    ) -> io::Result<Self> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(Uuid::new_v4().simple().to_string());
        let mut file = tokio::fs::File::create(&path).await?;
        file.write_all(&body.into()).await?;
        file.flush().await?;

        Ok(Self::new(path, original_name))
    }

    /// Sets the content type reported by the client.
    ///
    /// Unparseable values fall back to `application/octet-stream`.
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type
            .parse::<mime::Mime>()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        self
    }

    /// Marks the upload as interrupted so it is treated as absent.
    pub fn incomplete(mut self) -> Self {
        self.complete = false;
        self
    }

    /// Returns the content type reported by the client.
    pub fn content_type(&self) -> &mime::Mime {
        &self.content_type
    }
}

#[async_trait::async_trait]
impl UploadHandle for UploadedFile {
    fn is_valid(&self) -> bool {
        self.complete && !self.path.as_os_str().is_empty()
    }

    fn original_name(&self) -> &str {
        &self.original_name
    }

    fn source_path(&self) -> &Path {
        &self.path
    }

    async fn move_to(self, target: &Path) -> io::Result<()> {
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        if let Err(_rename_err) = tokio::fs::rename(&self.path, target).await {
            // rename fails across filesystems
            #[cfg(feature = "tracing")]
            tracing::debug!(
                source = %self.path.display(),
                target = %target.display(),
                error = %_rename_err,
                "upload: rename failed, copying instead"
            );
            tokio::fs::copy(&self.path, target).await?;
            tokio::fs::remove_file(&self.path).await?;
        }

        Ok(())
    }
}
