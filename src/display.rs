use std::path::{Path, PathBuf};

/// Lightweight reference to a resolved file.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef {
    path: PathBuf,
}

impl FileRef {
    /// Wraps `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Wraps `path` when a file exists there.
    pub async fn existing(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(Self { path }),
            _ => None,
        }
    }

    /// Returns the referenced path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the final path component as UTF-8, when possible.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

impl AsRef<Path> for FileRef {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// File slot of [`DisplayedData`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayedFile {
    /// Upload received in this submission, already moved to temp storage.
    Uploaded(FileRef),
    /// File that existed before this submission.
    Stored(FileRef),
    /// No file to show.
    #[default]
    Empty,
}

impl DisplayedFile {
    /// Returns the referenced file, if any.
    pub fn file(&self) -> Option<&FileRef> {
        match self {
            Self::Uploaded(file) | Self::Stored(file) => Some(file),
            Self::Empty => None,
        }
    }

    /// Returns `true` for [`DisplayedFile::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// UI-facing view of an upload field after a submission.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayedData {
    /// File to render, if any.
    pub file: DisplayedFile,
    /// Token to round-trip in a hidden input, or an empty string.
    pub token: String,
    /// Display name to round-trip in a hidden input, or an empty string.
    pub name: String,
}

impl DisplayedData {
    /// Returns the all-empty triple.
    pub fn empty() -> Self {
        Self::default()
    }
}
