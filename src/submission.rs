use crate::{storage::disk::safe_file_name, upload::UploadHandle};

/// Raw values submitted for an upload field in one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInput<U> {
    /// Newly uploaded file, when the client sent one.
    pub upload: Option<U>,
    /// Token of a previously staged upload, or an empty string.
    pub token: String,
    /// Display name of the previously staged upload, or an empty string.
    pub name: String,
}

impl<U> SubmissionInput<U> {
    /// Creates a submission carrying a new upload.
    pub fn upload(upload: U) -> Self {
        Self {
            upload: Some(upload),
            token: String::new(),
            name: String::new(),
        }
    }

    /// Creates a submission referencing an upload staged under `token`.
    pub fn token(token: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            upload: None,
            token: token.into(),
            name: name.into(),
        }
    }

    /// Creates a submission with every value left blank.
    pub fn empty() -> Self {
        Self {
            upload: None,
            token: String::new(),
            name: String::new(),
        }
    }
}

/// Classified submission, deciding which branch [`UploadField::submit`](crate::UploadField::submit) takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<U> {
    /// A valid upload that must be staged under a fresh token.
    NewUpload {
        /// The upload to move.
        upload: U,
        /// Staged filename derived from the upload's original name.
        name: String,
    },
    /// A reference to an upload staged by an earlier submission.
    TokenReference {
        /// Caller-supplied token.
        token: String,
        /// Staged filename derived from the caller-supplied display name.
        name: String,
    },
    /// Nothing was submitted.
    Empty,
}

impl<U> Submission<U>
where
    U: UploadHandle,
{
    /// Classifies raw input.
    ///
    /// Invalid uploads and uploads without a usable filename count as absent.
    /// A token whose name has no usable filename counts as nothing submitted.
    pub fn classify(input: SubmissionInput<U>) -> Self {
        if let Some(upload) = input.upload.filter(|upload| upload.is_valid()) {
            if let Some(name) = safe_file_name(upload.original_name()) {
                return Self::NewUpload { upload, name };
            }
        }

        if input.token.is_empty() {
            return Self::Empty;
        }

        match safe_file_name(&input.name) {
            Some(name) => Self::TokenReference {
                token: input.token,
                name,
            },
            None => Self::Empty,
        }
    }
}

impl<U> From<SubmissionInput<U>> for Submission<U>
where
    U: UploadHandle,
{
    fn from(input: SubmissionInput<U>) -> Self {
        Self::classify(input)
    }
}
