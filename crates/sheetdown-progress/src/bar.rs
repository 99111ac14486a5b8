//! Bar rendering

/// Render `####----- 42.0%` for a bar `width` characters wide
pub fn render_bar(width: usize, percent: f64) -> String {
    let filled = ((width as f64 * percent / 100.0) as usize).min(width);
    format!("{}{} {:.1}%", "#".repeat(filled), "-".repeat(width - filled), percent)
}
