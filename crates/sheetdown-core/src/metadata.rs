//! Persisted sheet metadata
//!
//! The worksheet to convert is chosen once and saved as a small JSON record:
//!
//! ```json
//! {
//!     "spreadsheet_id": "1AbC...",
//!     "sheet_id": 0,
//!     "sheet_title": "Sheet1"
//! }
//! ```
//!
//! Both string fields are required; a missing file or missing key is fatal
//! for a conversion run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Identifies one worksheet of one spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetReference {
    pub spreadsheet_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,
    pub sheet_title: String,
}

impl SheetReference {
    pub fn new<S: Into<String>, T: Into<String>>(spreadsheet_id: S, sheet_title: T) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            sheet_id: None,
            sheet_title: sheet_title.into(),
        }
    }

    /// Set the numeric worksheet id
    pub fn with_sheet_id(mut self, sheet_id: i64) -> Self {
        self.sheet_id = Some(sheet_id);
        self
    }

    /// Load a record from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| CoreError::metadata(path, format!("cannot read file: {e}")))?;
        Self::from_json(&text).map_err(|e| match e {
            CoreError::Json(e) => CoreError::metadata(path, e.to_string()),
            CoreError::Metadata { message, .. } => CoreError::metadata(path, message),
            other => other,
        })
    }

    /// Parse a record from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let reference: SheetReference = serde_json::from_str(text)?;
        if reference.spreadsheet_id.trim().is_empty() {
            return Err(CoreError::metadata("", "spreadsheet_id is empty"));
        }
        if reference.sheet_title.is_empty() {
            return Err(CoreError::metadata("", "sheet_title is empty"));
        }
        Ok(reference)
    }

    /// Save the record as pretty JSON, creating the parent directory
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_record() {
        let r = SheetReference::from_json(r#"{"spreadsheet_id":"X","sheet_title":"Sheet1"}"#)
            .unwrap();
        assert_eq!(r, SheetReference::new("X", "Sheet1"));
    }

    #[test]
    fn test_parse_with_sheet_id() {
        let r = SheetReference::from_json(
            r#"{"spreadsheet_id":"X","sheet_id":123,"sheet_title":"Data"}"#,
        )
        .unwrap();
        assert_eq!(r.sheet_id, Some(123));
    }

    #[test]
    fn test_missing_key_is_error() {
        assert!(SheetReference::from_json(r#"{"spreadsheet_id":"X"}"#).is_err());
        assert!(SheetReference::from_json(r#"{"sheet_title":"S"}"#).is_err());
        assert!(SheetReference::from_json(r#"{"spreadsheet_id":"","sheet_title":"S"}"#).is_err());
        assert!(SheetReference::from_json("not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SheetReference::load(dir.path().join("sheet_info.json")).unwrap_err();
        assert!(matches!(err, CoreError::Metadata { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("json").join("sheet_info.json");
        let r = SheetReference::new("abc", "Vehicles").with_sheet_id(7);
        r.save(&path).unwrap();
        assert_eq!(SheetReference::load(&path).unwrap(), r);
    }

    #[test]
    fn test_load_malformed_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet_info.json");
        std::fs::write(&path, r#"{"spreadsheet_id": 5}"#).unwrap();
        match SheetReference::load(&path).unwrap_err() {
            CoreError::Metadata { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
