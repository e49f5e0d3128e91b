//! Error types for Sparkle

use thiserror::Error;

/// The main error type for Sparkle operations
#[derive(Debug, Error)]
pub enum SparkleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Recipe '{0}' has no components")]
    EmptyRecipe(String),
}

/// Result type alias for Sparkle operations
pub type Result<T> = std::result::Result<T, SparkleError>;

impl From<toml::de::Error> for SparkleError {
    fn from(err: toml::de::Error) -> Self {
        SparkleError::TomlParseError(err.to_string())
    }
}
