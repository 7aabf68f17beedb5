use std::path::{Path, PathBuf};

use crate::{
    builder::UploadFieldBuilder,
    config::FieldConfig,
    display::{DisplayedData, DisplayedFile, FileRef},
    error::{FieldError, UploadError},
    storage::TempStorage,
    submission::{Submission, SubmissionInput},
    token::Token,
    upload::UploadHandle,
};

/// Form field binding a file upload to the form's data model.
///
/// An upload received with a submission that fails validation elsewhere is
/// staged under a random token. Re-submitting the token and name resolves the
/// staged file again without a second upload.
#[derive(Debug)]
pub struct UploadField<S> {
    name: String,
    storage: S,
    config: FieldConfig,
    data: Option<PathBuf>,
    displayed: DisplayedData,
}

impl UploadField<()> {
    /// Creates a fluent builder for the field called `name`.
    pub fn builder(name: impl Into<String>) -> UploadFieldBuilder {
        UploadFieldBuilder::new(name)
    }
}

impl<S> UploadField<S> {
    /// Creates a field with permissive configuration.
    pub fn new(name: impl Into<String>, storage: S) -> Self {
        Self::with_config(name, storage, FieldConfig::default())
    }

    pub(crate) fn with_config(name: impl Into<String>, storage: S, config: FieldConfig) -> Self {
        Self {
            name: name.into(),
            storage,
            config,
            data: None,
            displayed: DisplayedData::empty(),
        }
    }

    /// Returns the form field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Returns the temporary storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the resolved file path, if any.
    pub fn data(&self) -> Option<&Path> {
        self.data.as_deref()
    }

    /// Returns the view computed by the last submission.
    pub fn displayed_data(&self) -> &DisplayedData {
        &self.displayed
    }

    /// Seeds the resolved path, for example with a file saved earlier.
    ///
    /// Displayed data is left untouched until the next submission.
    pub fn set_data(&mut self, path: impl Into<PathBuf>) {
        self.data = Some(path.into());
    }

    /// Clears the resolved path.
    pub fn clear_data(&mut self) {
        self.data = None;
    }
}

impl<S> UploadField<S>
where
    S: TempStorage,
{
    /// Binds one form submission to this field.
    ///
    /// Storage and move failures are returned unchanged. An invalid upload is
    /// treated as if no upload was sent. Both the new-upload and token branches
    /// stage the file at `<temp_dir(token)>/<name>`.
    pub async fn submit<U>(&mut self, input: SubmissionInput<U>) -> Result<(), UploadError>
    where
        U: UploadHandle,
    {
        match Submission::classify(input) {
            Submission::NewUpload { upload, name } => self.stage_upload(upload, name).await,
            Submission::TokenReference { token, name } => self.resolve_token(token, name).await,
            Submission::Empty => {
                self.keep_existing().await;
                Ok(())
            }
        }
    }

    /// Validates the resolved file and returns its path.
    pub async fn clean(&self) -> Result<Option<&Path>, FieldError> {
        let Some(path) = self.data.as_deref() else {
            if self.config.required {
                return Err(FieldError::Required {
                    field: self.name.clone(),
                });
            }
            return Ok(None);
        };

        let meta = match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => {
                return Err(FieldError::Missing {
                    path: path.to_path_buf(),
                })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(FieldError::Missing {
                    path: path.to_path_buf(),
                })
            }
            Err(source) => {
                return Err(FieldError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if let Some(max_file_size) = self.config.max_file_size {
            if meta.len() > max_file_size {
                return Err(FieldError::FileTooLarge {
                    field: self.name.clone(),
                    max_file_size,
                });
            }
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        if !self.config.is_extension_allowed(extension) {
            return Err(FieldError::DisallowedExtension {
                field: self.name.clone(),
                extension: extension.to_owned(),
            });
        }

        Ok(Some(path))
    }

    async fn stage_upload<U>(&mut self, upload: U, name: String) -> Result<(), UploadError>
    where
        U: UploadHandle,
    {
        let token = Token::generate();
        let dir = self.storage.temp_dir(&token).await?;
        let path = staged_path(&dir, &name);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            field = self.name.as_str(),
            token = %token,
            source = %upload.source_path().display(),
            "upload field: staging new upload"
        );

        upload
            .move_to(&path)
            .await
            .map_err(|source| UploadError::Move {
                path: path.clone(),
                source,
            })?;

        self.displayed = DisplayedData {
            file: DisplayedFile::Uploaded(FileRef::new(path.clone())),
            token: token.into(),
            name,
        };
        self.data = Some(path);
        Ok(())
    }

    async fn resolve_token(&mut self, token: String, name: String) -> Result<(), UploadError> {
        let Some(parsed) = Token::parse(&token) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                field = self.name.as_str(),
                token = token.as_str(),
                "upload field: rejected malformed token"
            );
            return Err(UploadError::InvalidToken { token });
        };

        let dir = self.storage.temp_dir(&parsed).await?;
        let path = staged_path(&dir, &name);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            field = self.name.as_str(),
            token = token.as_str(),
            path = %path.display(),
            "upload field: resolving staged upload"
        );

        let file = match FileRef::existing(path.clone()).await {
            Some(file) => DisplayedFile::Stored(file),
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    field = self.name.as_str(),
                    path = %path.display(),
                    "upload field: staged file not found"
                );
                DisplayedFile::Empty
            }
        };

        self.displayed = DisplayedData { file, token, name };
        self.data = Some(path);
        Ok(())
    }

    async fn keep_existing(&mut self) {
        let file = match &self.data {
            Some(path) => FileRef::existing(path.clone())
                .await
                .map_or(DisplayedFile::Empty, DisplayedFile::Stored),
            None => DisplayedFile::Empty,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            field = self.name.as_str(),
            has_data = self.data.is_some(),
            "upload field: empty submission"
        );

        self.displayed = DisplayedData {
            file,
            token: String::new(),
            name: String::new(),
        };
    }
}

/// Location of a staged upload: `<temp_dir(token)>/<name>`.
fn staged_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}
