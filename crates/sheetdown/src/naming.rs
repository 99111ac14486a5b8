//! Output file naming
//!
//! Generated names are untrusted model output, so they are reduced to
//! `[a-z0-9_.]`, given the expected extension and bounded in length.

use sheetdown_render::prompt::MAX_FILE_NAME_LEN;

/// Normalize a proposed file name, or `None` if nothing usable remains
///
/// `extension` may be given with or without its leading dot.
pub fn normalize_file_name(raw: &str, extension: &str) -> Option<String> {
    let suffix = format!(".{}", extension.trim_start_matches('.').to_lowercase());

    let name: String = raw
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '.')
        .collect();
    let name = name.trim_end_matches('.');

    let stem = name.strip_suffix(suffix.as_str()).unwrap_or(name);
    let max_stem = MAX_FILE_NAME_LEN.saturating_sub(suffix.len());
    // ASCII only after filtering, so byte slicing is safe
    let stem = &stem[..stem.len().min(max_stem)];
    let stem = stem.trim_end_matches('.');

    if stem.chars().all(|c| c == '.' || c == '_') {
        return None;
    }
    Some(format!("{stem}{suffix}"))
}

/// Normalize a proposed file name, returning `fallback` verbatim if
/// nothing usable remains
pub fn sanitize_file_name(raw: &str, extension: &str, fallback: &str) -> String {
    normalize_file_name(raw, extension).unwrap_or_else(|| fallback.to_string())
}
