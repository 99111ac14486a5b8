//! CSV grid source
//!
//! Reads a local CSV export as the worksheet grid, for offline runs. Every
//! field becomes a plain [`Cell`]: CSV carries no formula or validation
//! provenance.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sheetdown_core::{Cell, SheetReference, Table};

use crate::auth::AccessToken;
use crate::error::Result;
use crate::GridSource;

/// Options for reading CSV files
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Trim surrounding whitespace from fields
    pub trim: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: false,
        }
    }
}

/// [`GridSource`] backed by a CSV file; the sheet reference is ignored
#[derive(Debug, Clone)]
pub struct CsvGridSource {
    path: PathBuf,
    options: CsvReadOptions,
}

impl CsvGridSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_options(path, CsvReadOptions::default())
    }

    pub fn with_options<P: Into<PathBuf>>(path: P, options: CsvReadOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read CSV from a reader into a grid; ragged rows are kept as-is
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> Result<Table<Cell>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let mut table = Table::new();
        for result in csv_reader.records() {
            let record = result?;
            table.push_row(record.iter().map(Cell::new).collect());
        }
        Ok(table)
    }
}

impl GridSource for CsvGridSource {
    fn fetch_grid(&self, _sheet: &SheetReference, _token: &AccessToken) -> Result<Table<Cell>> {
        tracing::debug!("reading grid from {}", self.path.display());
        let file = File::open(&self.path)?;
        Self::read(file, &self.options)
    }
}
