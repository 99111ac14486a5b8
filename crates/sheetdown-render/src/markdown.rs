//! Deterministic Markdown table renderer

use sheetdown_core::Table;

use crate::options::RenderOptions;

/// Returned by [`MarkdownRenderer::render`] for a table with no rows
pub const NO_DATA: &str = "No data available.";

/// Pipe-delimited Markdown table renderer
///
/// The first row is the header and the separator row always has exactly as
/// many cells as the header. Data rows are written as-is: a short row
/// renders with fewer cells and a long row with more.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a table, or [`NO_DATA`] if it is empty
    pub fn render<S: AsRef<str>>(&self, table: &Table<S>) -> String {
        let Some(header) = table.header() else {
            return NO_DATA.to_string();
        };

        let mut lines = Vec::with_capacity(table.row_count() + 1);
        lines.push(render_row(header));
        lines.push(separator(header.len()));
        lines.extend(table.body().iter().map(|row| render_row(row)));

        let terminator = self.options.line_terminator.as_str();
        let mut out = lines.join(terminator);
        if self.options.trailing_newline {
            out.push_str(terminator);
        }
        out
    }
}

fn render_row<S: AsRef<str>>(row: &[S]) -> String {
    let mut line = String::from("|");
    for cell in row {
        line.push(' ');
        line.push_str(&escape_cell(cell.as_ref()));
        line.push_str(" |");
    }
    line
}

fn separator(columns: usize) -> String {
    let mut line = String::from("|");
    for _ in 0..columns {
        line.push_str(" --- |");
    }
    line
}

/// Keep one physical line per row and one `|` per cell boundary
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}
