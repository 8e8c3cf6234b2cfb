use std::sync::LazyLock;

use regex::Regex;

// Separator and capture both stay on the marker's line.
static INFER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)etiquetas?[: \t]+([^\r\n]+)").unwrap());

/// Comma-split a raw tag string, trimming each piece and dropping empties.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pull the raw tag list out of a free-text summary.
///
/// Looks for `etiqueta`/`etiquetas` (any case) followed by a colon or
/// whitespace and returns the rest of that line as-is, for the user to edit
/// before it is split with [`split_tags`]. When the marker appears more than
/// once the last occurrence wins.
pub fn infer_tags(summary: &str) -> Option<String> {
    INFER_RE
        .captures_iter(summary)
        .last()
        .map(|caps| caps[1].to_string())
}
