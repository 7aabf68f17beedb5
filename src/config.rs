use crate::error::ConfigError;

/// Validation rules applied by [`UploadField::clean`](crate::UploadField::clean).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldConfig {
    /// Whether the field must hold a file once cleaned.
    pub required: bool,
    /// Maximum accepted file size in bytes.
    pub max_file_size: Option<u64>,
    /// Allowed file extensions without the leading dot (for example: `jpg`).
    ///
    /// An empty list accepts any extension.
    pub allowed_extensions: Vec<String>,
}

impl FieldConfig {
    /// Creates a permissive configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration for the field called `name`.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyFieldName);
        }

        if self.max_file_size == Some(0) {
            return Err(ConfigError::InvalidMaxFileSize {
                name: name.to_owned(),
            });
        }

        for extension in &self.allowed_extensions {
            if extension.is_empty() || extension.contains(['.', '/', '\\']) {
                return Err(ConfigError::InvalidExtension {
                    extension: extension.clone(),
                });
            }
        }

        Ok(())
    }

    /// Returns `true` when `extension` is allowed by the configured allowlist.
    pub fn is_extension_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions.is_empty()
            || self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}
