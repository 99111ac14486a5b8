//! Error types for remote collaborators

use thiserror::Error;

/// Result type for remote operations
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Errors from the spreadsheet, model and credential collaborators
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level HTTP failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Response or payload (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No usable credentials were found
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// The model returned no text
    #[error("Model returned an empty response")]
    EmptyResponse,

    /// The spreadsheet response had no grid for the requested sheet
    #[error("No grid data for sheet '{0}'")]
    NoSheetData(String),
}
