//! # sheetdown-core
//!
//! Core data structures for the sheetdown spreadsheet-to-Markdown pipeline.
//!
//! This crate provides:
//! - [`Cell`] - A fetched cell: display value plus formula/dropdown provenance
//! - [`Table`] - An ordered grid of rows, generic over the cell type
//! - [`annotate`] - The one-way rewrite of a [`Cell`] into renderer-ready text
//! - [`SheetReference`] - The persisted `{spreadsheet_id, sheet_title}` record
//!
//! ## Example
//!
//! ```rust
//! use sheetdown_core::{annotate_table, Cell, Table};
//!
//! let table = Table::from_rows(vec![
//!     vec![Cell::new("Name"), Cell::new("Paid")],
//!     vec![Cell::new("Alice"), Cell::new("TRUE")],
//! ]);
//!
//! let annotated = annotate_table(&table);
//! assert_eq!(annotated.rows()[1][1], "☒");
//! ```

pub mod annotate;
pub mod cell;
pub mod error;
pub mod metadata;
pub mod table;

pub use annotate::{annotate, annotate_table, CHECKED, FALSE_LEXEMES, TRUE_LEXEMES, UNCHECKED};
pub use cell::{AnnotatedCell, Cell};
pub use error::{CoreError, Result};
pub use metadata::SheetReference;
pub use table::{Row, Table};

/// Default location of the persisted sheet metadata record
pub const DEFAULT_METADATA_PATH: &str = "json/sheet_info.json";
