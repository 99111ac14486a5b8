//! Error types for sheetdown-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`CoreError`]
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in sheetdown-core
#[derive(Debug, Error)]
pub enum CoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The metadata record is missing or does not have the required fields
    #[error("Invalid sheet metadata in '{}': {message}", path.display())]
    Metadata { path: PathBuf, message: String },
}

impl CoreError {
    /// Create a metadata error for the given file
    pub fn metadata<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        CoreError::Metadata {
            path: path.into(),
            message: message.into(),
        }
    }
}
