//! Markdown file writer

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Writes the rendered document as UTF-8
pub struct OutputWriter;

impl OutputWriter {
    /// Write `text` to `dir/name`, creating `dir` if needed
    pub fn write<P: AsRef<Path>>(dir: P, name: &str, text: &str) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let path = dir.join(name);
        let io_err = |source| PipelineError::Output {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(dir).map_err(io_err)?;
        fs::write(&path, text).map_err(io_err)?;
        tracing::info!("wrote {} bytes to {}", text.len(), path.display());
        Ok(path)
    }
}
