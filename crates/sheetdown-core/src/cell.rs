//! Cell types
//!
//! A [`Cell`] is what the remote grid source hands back for one position:
//! the formatted display value plus the provenance the renderer cares about.

use std::fmt;

/// Text produced by [`annotate`](crate::annotate::annotate) for a single cell.
///
/// Annotation is one-way: formula and dropdown provenance are folded into
/// markup and cannot be recovered from the string.
pub type AnnotatedCell = String;

/// One spreadsheet data point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Formatted value as shown in the spreadsheet UI (possibly empty)
    pub display_value: String,
    /// Formula text the value was computed from (e.g., "=SUM(A1:A3)")
    pub formula: Option<String>,
    /// Dropdown validation options, in source order
    pub dropdown_options: Vec<String>,
}

impl Cell {
    /// Create a plain cell with only a display value
    pub fn new<S: Into<String>>(display_value: S) -> Self {
        Self {
            display_value: display_value.into(),
            formula: None,
            dropdown_options: Vec::new(),
        }
    }

    /// Attach the formula the display value was computed from
    pub fn with_formula<S: Into<String>>(mut self, formula: S) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Attach dropdown validation options
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dropdown_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Check if the cell was computed by a formula
    pub fn is_formula(&self) -> bool {
        self.formula.is_some()
    }

    /// Check if the cell carries dropdown options
    pub fn has_dropdown(&self) -> bool {
        !self.dropdown_options.is_empty()
    }

    /// Check if the cell has no value and no provenance
    pub fn is_empty(&self) -> bool {
        self.display_value.is_empty() && !self.is_formula() && !self.has_dropdown()
    }

    /// Provenance-tagged text form, e.g. `5 [formula: =A1+A2] [options: 1, 5]`
    pub fn tagged(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value)?;
        if let Some(formula) = &self.formula {
            write!(f, " [formula: {}]", formula)?;
        }
        if self.has_dropdown() {
            write!(f, " [options: {}]", self.dropdown_options.join(", "))?;
        }
        Ok(())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::new(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::new(value)
    }
}
