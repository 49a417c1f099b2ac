//! Locale-aware string ordering for name sorting.
//!
//! Approximates the root collation used by browsers' `localeCompare`: letters
//! compare without regard to accents or case first, then accents break ties
//! (unaccented first), then case (lowercase first). Punctuation and symbols
//! sort before digits, and digits before letters.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Character class rank: punctuation and symbols, then digits, then letters.
fn class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

/// Base letters only: decomposed, marks dropped, case folded, keyed by class first.
fn primary_key(s: &str) -> Vec<(u8, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (class(c), c))
        .collect()
}

/// Decomposed and case folded, marks kept.
fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Per-letter case flags, lowercase sorting before uppercase.
fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}

/// What: Compare two strings the way a human-facing A-Z list expects.
///
/// Inputs:
/// - `a`, `b`: Strings to compare.
///
/// Output:
/// - Total ordering; `Equal` only for identical strings.
///
/// Details:
/// - Accented names sort beside their base letters instead of after `z`.
/// - Falls back to byte order last so the ordering is total and sorts are idempotent.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}
