/// What: Strip a trailing inline comment from a config value.
///
/// Inputs:
/// - `s`: Raw value text after `=`.
///
/// Output:
/// - Value up to the first `//` or `#`, trimmed.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
    let end = [s.find("//"), s.find('#')]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(s.len());
    s[..end].trim()
}

/// Normalize a config key: lowercase, with `.`, `-`, and spaces mapped to `_`.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['.', '-', ' '], "_")
}

/// What: Split one config line into a normalized key and its value.
///
/// Inputs:
/// - `line`: Raw line from a `.conf` file.
///
/// Output:
/// - `Some((key, value))` for `key = value` lines; `None` for blanks, comments,
///   and lines without `=`.
pub(crate) fn split_key_value(line: &str) -> Option<(String, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
        return None;
    }
    let (raw_key, val_raw) = trimmed.split_once('=')?;
    Some((normalize_key(raw_key), strip_inline_comment(val_raw.trim())))
}
