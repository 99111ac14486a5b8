//! Pipeline configuration

use std::path::PathBuf;

use sheetdown_core::DEFAULT_METADATA_PATH;

/// Paths and names used by [`Pipeline`](crate::Pipeline)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Sheet reference written by `sheetdown select`
    pub metadata_path: PathBuf,
    /// Directory the Markdown file is written to (created if missing)
    pub output_dir: PathBuf,
    /// Used verbatim when no usable name is generated
    pub fallback_file_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            metadata_path: PathBuf::from(DEFAULT_METADATA_PATH),
            output_dir: PathBuf::from("output"),
            fallback_file_name: "output.md".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn with_metadata_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.metadata_path = path.into();
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }
}
