//! Row and table types
//!
//! A [`Table`] is a plain ordered grid. Rows are not normalized to a common
//! width: column position is significant, but a short row stays short.

/// An ordered sequence of cells
pub type Row<T> = Vec<T>;

/// An ordered sequence of rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<T> {
    rows: Vec<Row<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> Table<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows, preserving their order
    pub fn from_rows(rows: Vec<Row<T>>) -> Self {
        Self { rows }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Row<T>) {
        self.rows.push(row);
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows, header included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row in the table
    pub fn max_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// All rows in source order
    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    /// First row, when treated as a header
    pub fn header(&self) -> Option<&Row<T>> {
        self.rows.first()
    }

    /// Rows after the header
    pub fn body(&self) -> &[Row<T>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Apply `f` to every cell, keeping the table's shape
    pub fn map_cells<U, F>(&self, mut f: F) -> Table<U>
    where
        F: FnMut(&T) -> U,
    {
        Table {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(&mut f).collect())
                .collect(),
        }
    }

    /// Keep only the first `count` rows
    pub fn head(&self, count: usize) -> &[Row<T>] {
        &self.rows[..count.min(self.rows.len())]
    }

    pub fn into_rows(self) -> Vec<Row<T>> {
        self.rows
    }
}

impl<T> From<Vec<Row<T>>> for Table<T> {
    fn from(rows: Vec<Row<T>>) -> Self {
        Table::from_rows(rows)
    }
}
