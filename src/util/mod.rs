//! Small utility helpers for timestamps, number formatting, text matching,
//! and column layout.
//!
//! Used by feed loading, the filter predicate, and the listing output.

pub mod collate;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use unicode_width::UnicodeWidthChar;

/// What: Parse a feed timestamp into UTC.
///
/// Inputs:
/// - `s`: RFC 3339 instant (`2025-04-05T10:30:00Z`), a date-time without offset
///   (`2025-04-05T10:30:00`), or a bare date (`2025-04-05`).
///
/// Output:
/// - `Some(DateTime<Utc>)` on success; `None` for blank or unparseable input.
///
/// Details:
/// - Date-times without an offset are taken as UTC; bare dates as midnight UTC.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ndt.and_utc());
    }
    NaiveDate::parse_from_str(t, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

/// What: Format an optional discovery time as a short date.
///
/// Inputs:
/// - `ts`: Optional UTC timestamp.
///
/// Output:
/// - `YYYY-MM-DD`, or `"unknown"` for `None`.
#[must_use]
pub fn format_date(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(
        || "unknown".to_string(),
        |d| d.format("%Y-%m-%d").to_string(),
    )
}

/// What: Render a count compactly (`950`, `12.4k`, `1.3M`).
///
/// Inputs:
/// - `n`: Count to format.
///
/// Output:
/// - Compact string with at most one decimal; trailing `.0` dropped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_count(n: u64) -> String {
    fn with_suffix(v: f64, suffix: &str) -> String {
        let s = format!("{v:.1}");
        let s = s.strip_suffix(".0").unwrap_or(&s);
        format!("{s}{suffix}")
    }
    match n {
        0..=999 => n.to_string(),
        1_000..=999_949 => with_suffix(n as f64 / 1_000.0, "k"),
        1_000_000..=999_949_999 => with_suffix(n as f64 / 1_000_000.0, "M"),
        _ => with_suffix(n as f64 / 1_000_000_000.0, "B"),
    }
}

/// What: Describe an entry's popularity metric for listings.
///
/// Inputs:
/// - `metric`: Optional metric.
///
/// Output:
/// - e.g. `"12.3k stars"`; `"-"` when the entry has no metric.
#[must_use]
pub fn format_metric(metric: Option<crate::state::Metric>) -> String {
    metric.map_or_else(
        || "-".to_string(),
        |m| format!("{} {}", format_count(m.value()), m.unit()),
    )
}

/// What: Split tags into the ones shown inline and an overflow count.
///
/// Inputs:
/// - `tags`: Tags in feed order.
/// - `limit`: Maximum number shown inline.
///
/// Output:
/// - Leading `limit` tags and the number of hidden tags.
#[must_use]
pub fn tag_preview(tags: &[String], limit: usize) -> (&[String], usize) {
    let shown = tags.len().min(limit);
    (&tags[..shown], tags.len() - shown)
}

/// What: Format tags for a single listing line (`a, b, c +2`).
///
/// Inputs:
/// - `tags`: Tags in feed order.
/// - `limit`: Maximum number shown inline.
///
/// Output:
/// - Comma-joined leading tags with a `+N` suffix when some are hidden.
#[must_use]
pub fn format_tags(tags: &[String], limit: usize) -> String {
    let (shown, hidden) = tag_preview(tags, limit);
    let mut out = shown.join(", ");
    if hidden > 0 {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("+{hidden}"));
    }
    out
}

/// Rank how well a name matches a query using fuzzy matching (fzf-style) with a provided matcher.
///
/// Inputs:
/// - `name`: Entry name to match against
/// - `query`: Query string to match
/// - `matcher`: Reference to a `SkimMatcherV2` instance to reuse across multiple calls
///
/// Output:
/// - `Some(score)` if the query matches the name (higher score = better match), `None` if no match
#[must_use]
pub fn fuzzy_match_rank_with_matcher(
    name: &str,
    query: &str,
    matcher: &fuzzy_matcher::skim::SkimMatcherV2,
) -> Option<i64> {
    use fuzzy_matcher::FuzzyMatcher;

    if query.trim().is_empty() {
        return None;
    }

    matcher.fuzzy_match(name, query)
}

/// What: Fit text into a fixed number of terminal columns.
///
/// Inputs:
/// - `s`: Text to fit.
/// - `width`: Column budget.
///
/// Output:
/// - Text padded with spaces to exactly `width` columns, or cut with a trailing `…`.
///
/// Details:
/// - Uses display width so wide (CJK) characters count as two columns.
#[must_use]
pub fn fit_width(s: &str, width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        let mut out = s.to_string();
        out.push_str(&" ".repeat(width - total));
        return out;
    }
    let budget = width.saturating_sub(1);
    let mut used = 0usize;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if width > 0 {
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
