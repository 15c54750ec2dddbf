//! Shared utility functions.

/// The first `max_chars` characters of `s`.
///
/// Borrows from the input; strings that are already short enough are
/// returned whole.
pub fn prefix_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Single-line preview of `s` for log messages
pub fn log_preview(s: &str, max_chars: usize) -> String {
    prefix_chars(s, max_chars)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
