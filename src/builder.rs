use crate::{config::FieldConfig, error::ConfigError, field::UploadField, storage::TempStorage};

/// Builder for configuring an [`UploadField`].
#[derive(Debug, Clone)]
pub struct UploadFieldBuilder {
    name: String,
    config: FieldConfig,
}

impl UploadFieldBuilder {
    /// Creates a builder for the field called `name` with default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: FieldConfig::default(),
        }
    }

    /// Returns the current builder configuration snapshot.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Replaces the full builder configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets whether the field must hold a file once cleaned.
    pub fn required(mut self, required: bool) -> Self {
        self.config.required = required;
        self
    }

    /// Sets the maximum accepted file size in bytes.
    pub fn max_file_size(mut self, max_file_size: u64) -> Self {
        self.config.max_file_size = Some(max_file_size);
        self
    }

    /// Sets the allowed file extensions.
    pub fn allowed_extensions<I, E>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.config.allowed_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Validates builder configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate(&self.name)
    }

    /// Finalizes the field with the given temporary storage backend.
    pub fn build<S>(self, storage: S) -> Result<UploadField<S>, ConfigError>
    where
        S: TempStorage,
    {
        self.config.validate(&self.name)?;
        Ok(UploadField::with_config(self.name, storage, self.config))
    }
}
