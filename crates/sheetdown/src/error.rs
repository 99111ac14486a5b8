//! Pipeline error types

use std::path::PathBuf;

use sheetdown_core::CoreError;
use sheetdown_remote::RemoteError;
use thiserror::Error;

/// Result type for pipeline runs
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort a pipeline run
///
/// Remote fetch and model failures never surface here: a failed fetch is
/// treated as no data and model failures fall back to deterministic output.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No usable credentials
    #[error("Authentication failed: {0}")]
    Authentication(#[source] RemoteError),

    /// The sheet reference could not be loaded
    #[error("Could not load sheet metadata: {0}")]
    Metadata(#[source] CoreError),

    /// The Markdown file could not be written
    #[error("Could not write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Pre-flight errors, raised before any grid is fetched
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Authentication(_) | Self::Metadata(_))
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let auth = PipelineError::Authentication(RemoteError::MissingCredentials("none".into()));
        assert!(auth.is_fatal());
        assert_eq!(auth.exit_code(), 2);

        let meta = PipelineError::Metadata(CoreError::metadata("json/sheet_info.json", "missing"));
        assert_eq!(meta.exit_code(), 2);

        let output = PipelineError::Output {
            path: PathBuf::from("output/x.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!output.is_fatal());
        assert_eq!(output.exit_code(), 1);
        assert!(output.to_string().contains("output/x.md"));
    }
}
