//! Prompts for the model-assisted rendering and naming paths
//!
//! The model path is best-effort: whatever comes back goes through
//! [`clean_model_table`], and an empty result means the caller must fall
//! back to [`MarkdownRenderer`](crate::MarkdownRenderer).

use once_cell::sync::Lazy;
use regex::Regex;
use sheetdown_core::{Cell, Table};

/// Rows sampled from the grid when asking for a file name
pub const NAMING_SAMPLE_ROWS: usize = 3;

/// Upper bound on generated file names, extension included
pub const MAX_FILE_NAME_LEN: usize = 50;

/// System instruction for the table formatting request
pub const FORMAT_SYSTEM_INSTRUCTION: &str = "\
You are a spreadsheet to Word table converter. Follow these STRICT rules:

1. Table structure:
   ┌────────────────┬──────────────┬─────────────────┐
   │ **PLATE**      │ **CHASSIS**  │ **REGISTRY**    │
   ╞════════════════╪══════════════╪═════════════════╡
   │ REMOVED        │ REMOVED      │ 9.582.647-3     │
   ├────────────────┼──────────────┼─────────────────┤
   │ REMOVED        │ REMOVED      │ 8.732.491-5     │
   ├────────────────┼──────────────┼─────────────────┤
   │ SCRAP...       │ 9BWSU21FX... │ 7.891.234-6     │
   └────────────────┴──────────────┴─────────────────┘

2. Formatting rules:
   - Numbers: 8.732.491-5 (thousand separators)
   - Currency: R$ 176.000,00 (ISO BRL format)
   - Dates: 22/05/2025 (DD/MM/YYYY)
   - Checkboxes: ☐ (unchecked) ☒ (checked) centered
   - Formulas: *SUM(A1:B2)* (italic)
   - Dropdowns: Value (Option1, Option2)
   - Repetitive values: Keep exact duplicates

3. Prohibited:
   - Any non-table text
   - Comments/notes/analysis
   - Row placeholders (e.g., \"...\", \"rows X-Y\")
   - Data modifications
   - Column adjustments

4. Data requirements:
   - Include 100% of rows
   - Maintain exact source order
   - Preserve all duplicates
   - Show full values (no truncation)
   - Keep original capitalization

Return ONLY the complete table using box-drawing characters.";

/// Flatten rows to `a, b, c` lines
pub fn flatten_rows<S: AsRef<str>>(table: &Table<S>) -> String {
    table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_ref())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// User prompt for the table formatting request
pub fn format_prompt<S: AsRef<str>>(table: &Table<S>) -> String {
    format!(
        "Here is the spreadsheet data:\n{}\n\n\
         Please format this data in a more readable and organized way, highlighting \
         important information. Return the result as a table only.",
        flatten_rows(table)
    )
}

/// User prompt for the file naming request
pub fn naming_prompt(table: &Table<Cell>) -> String {
    let sample = table
        .head(NAMING_SAMPLE_ROWS)
        .iter()
        .map(|row| row.iter().map(Cell::tagged).collect::<Vec<_>>().join(", "))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Generate a simple markdown filename based on this spreadsheet data:\n{sample}\n\n\
         Requirements:\n\
         - Use only lowercase letters, numbers and underscores\n\
         - Must end with .md\n\
         - Maximum {MAX_FILE_NAME_LEN} characters\n\
         - No special characters\n\
         - No spaces\n\
         Reply with the filename only."
    )
}

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?```").expect("valid fence regex")
});

/// Strip a surrounding code fence and whitespace; `None` if nothing is left
///
/// A fenced reply must consist of the fence alone. Commentary before or
/// after it, or an unterminated fence, makes the reply unusable.
pub fn clean_model_table(response: &str) -> Option<String> {
    let trimmed = response.trim();
    let body = if trimmed.contains("```") {
        let caps = CODE_FENCE.captures(trimmed)?;
        let fence = caps.get(0)?;
        let outside = [&trimmed[..fence.start()], &trimmed[fence.end()..]];
        if outside.iter().any(|text| !text.trim().is_empty()) {
            return None;
        }
        caps.get(1).map_or("", |m| m.as_str())
    } else {
        trimmed
    };
    let body = body.trim_matches(['\r', '\n']);
    if body.trim().is_empty() {
        None
    } else {
        Some(format!("{}\n", body.trim_end()))
    }
}
