use std::{io, path::PathBuf};

use thiserror::Error;

/// Configuration-time validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The form field name was empty.
    #[error("upload field name cannot be empty")]
    EmptyFieldName,
    /// `max_file_size` was configured as zero.
    #[error("field `{name}` has invalid max_file_size of 0")]
    InvalidMaxFileSize {
        /// Name of the field with an invalid size.
        name: String,
    },
    /// An allowed extension entry is empty or malformed.
    #[error("invalid allowed extension `{extension}`")]
    InvalidExtension {
        /// The invalid extension value.
        extension: String,
    },
}

/// Temporary storage failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Generic storage failure with message context.
    #[error("{message}")]
    Message {
        /// Storage failure message.
        message: String,
    },
}

impl StorageError {
    /// Creates a storage error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Runtime error returned by [`UploadField::submit`](crate::UploadField::submit).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UploadError {
    /// Temporary storage backend failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Moving the upload into its temporary directory failed.
    #[error("failed to move upload to `{}`: {source}", path.display())]
    Move {
        /// Destination path of the move.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A submitted token is not a 6-digit token.
    #[error("invalid upload token `{token}`")]
    InvalidToken {
        /// The rejected token value.
        token: String,
    },
}

/// Validation failures reported by [`UploadField::clean`](crate::UploadField::clean).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FieldError {
    /// The field is required but holds no file.
    #[error("field `{field}` is required")]
    Required {
        /// Form field name.
        field: String,
    },
    /// The resolved path does not point to an existing file.
    #[error("file `{}` does not exist", path.display())]
    Missing {
        /// Resolved path that was checked.
        path: PathBuf,
    },
    /// The file is larger than the configured limit.
    #[error("field `{field}` exceeded max file size of {max_file_size} bytes")]
    FileTooLarge {
        /// Form field name.
        field: String,
        /// Maximum allowed file size in bytes.
        max_file_size: u64,
    },
    /// The file extension is not in the configured allowlist.
    #[error("field `{field}` has disallowed extension `{extension}`")]
    DisallowedExtension {
        /// Form field name.
        field: String,
        /// Extension encountered on the file.
        extension: String,
    },
    /// Reading file metadata failed.
    #[error("failed to inspect `{}`: {source}", path.display())]
    Io {
        /// Path whose metadata was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
