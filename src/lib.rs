//! Core crate surface for `stashfield`.

/// Fluent builder API.
pub mod builder;
/// Upload field configuration.
pub mod config;
/// Displayed data model.
pub mod display;
/// Error types exposed by this crate.
pub mod error;
/// The upload field itself.
pub mod field;
/// Temporary storage traits and implementations.
pub mod storage;
/// Raw and classified submissions.
pub mod submission;
/// Upload tokens.
pub mod token;
/// Upload handle capability.
pub mod upload;

pub use builder::UploadFieldBuilder;
pub use config::FieldConfig;
pub use display::{DisplayedData, DisplayedFile, FileRef};
pub use error::{ConfigError, FieldError, StorageError, UploadError};
pub use field::UploadField;
pub use storage::{DiskTempStorage, DiskTempStorageBuilder, TempStorage};
pub use submission::{Submission, SubmissionInput};
pub use token::Token;
pub use upload::{UploadHandle, UploadedFile};
