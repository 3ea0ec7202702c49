use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading block data, classifying codepoints
/// or laying out grids and tiles
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// A configuration value is out of range or malformed
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfig { field: String, message: String },

    /// A codepoint outside `0..=0x10FFFF` was handed to the classifier
    #[error("Invalid codepoint: {0:#X} (max 0x10FFFF)")]
    InvalidCodepoint(u32),

    /// Sequential generation ran past the last Unicode scalar value
    #[error("Codepoint sequence overflowed past U+10FFFF (reached {codepoint:#X})")]
    CodepointOverflow { codepoint: u32 },

    /// Block catalog JSON could not be deserialized
    #[error("Failed to parse block catalog: {0}")]
    CatalogParse(String),

    /// Block catalog deserialized but violates its invariants
    #[error("Invalid block catalog: {0}")]
    CatalogValidation(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Error when writing an output file
    #[error("Failed to write file {path}: {message}")]
    FileWriteError { path: PathBuf, message: String },

    /// Raster output could not be encoded
    #[error("Image encoding error: {0}")]
    ImageEncoding(String),
}

/// Type alias for Result with `PaletteError`
pub type Result<T> = std::result::Result<T, PaletteError>;

impl PaletteError {
    /// Create a parameter validation error
    pub fn param(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller-supplied configuration
    /// rather than by data or output failures
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. } | Self::ConfigurationError(_) | Self::InvalidCodepoint(_)
        )
    }
}
