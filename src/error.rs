use thiserror::Error;

/// Unified error type for autoversion operations
#[derive(Error, Debug)]
pub enum AutoversionError {
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Changelog parse error: {0}")]
    DocumentParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in autoversion
pub type Result<T> = std::result::Result<T, AutoversionError>;

impl AutoversionError {
    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        AutoversionError::InvalidVersion(msg.into())
    }

    /// Create a changelog document error with context
    pub fn document(msg: impl Into<String>) -> Self {
        AutoversionError::DocumentParse(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutoversionError::Config(msg.into())
    }
}
