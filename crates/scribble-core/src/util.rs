//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Replace the characters in `[start, end)` of `text` with `inserted`.
///
/// Offsets are character offsets and are clamped to the text.
pub fn replace_chars(text: &str, start: usize, end: usize, inserted: &str) -> String {
    let byte_at = |position: usize| {
        text.char_indices()
            .nth(position)
            .map_or(text.len(), |(byte, _)| byte)
    };
    let (from, to) = (byte_at(start.min(end)), byte_at(start.max(end)));
    let mut output = String::with_capacity(text.len() + inserted.len());
    output.push_str(&text[..from]);
    output.push_str(inserted);
    output.push_str(&text[to..]);
    output
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}
