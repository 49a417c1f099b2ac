//! Plain-text rendering of pipeline output.

use std::fmt::Write as _;

use crate::catalog::FeedRecord;
use crate::logic::DashboardStats;
use crate::state::{CatalogEntry, Category, SortMode};
use crate::util::{fit_width, format_date, format_metric, format_tags};

/// Shown while a query is pending.
pub const LOADING_PLACEHOLDER: &str = "Loading tools...";
/// Shown when a settled query produced no entries.
pub const NO_MATCHES: &str = "No tools match the selected filters.";

/// Column widths: name, source, category, metric, date.
const COLS: [usize; 5] = [24, 12, 22, 16, 10];

/// What: Render the results grid.
///
/// Inputs:
/// - `entries`: Ordered results
/// - `tag_limit`: Tags shown per row before the `+N` overflow marker
/// - `sort`: Strategy named in the footer; `None` for the unsorted reset listing
///
/// Output:
/// - Header plus one row per entry, or the no-matches line when `entries` is empty.
#[must_use]
pub fn render_grid(
    entries: &[CatalogEntry],
    tag_limit: usize,
    sort: Option<SortMode>,
) -> String {
    if entries.is_empty() {
        return format!("{NO_MATCHES}\n");
    }
    let mut out = String::new();
    let header = [
        fit_width("NAME", COLS[0]),
        fit_width("SOURCE", COLS[1]),
        fit_width("CATEGORY", COLS[2]),
        fit_width("METRIC", COLS[3]),
        fit_width("ADDED", COLS[4]),
    ];
    let _ = writeln!(out, "{}  TAGS", header.join("  "));
    for e in entries {
        let row = [
            fit_width(&e.name, COLS[0]),
            fit_width(e.source.label(), COLS[1]),
            fit_width(e.category.label(), COLS[2]),
            fit_width(&format_metric(e.metric), COLS[3]),
            fit_width(&format_date(e.date_added), COLS[4]),
        ];
        let _ = writeln!(out, "{}  {}", row.join("  "), format_tags(&e.tags, tag_limit));
    }
    match sort {
        Some(mode) => {
            let _ = writeln!(out, "{} tool(s), {}", entries.len(), mode.label());
        }
        None => {
            let _ = writeln!(out, "{} tool(s)", entries.len());
        }
    }
    out
}

/// What: Render the latest-tools list.
///
/// Inputs:
/// - `entries`: Newest-first entries
///
/// Output:
/// - Titled list, one `date  name (source)` line per entry.
#[must_use]
pub fn render_latest(entries: &[CatalogEntry]) -> String {
    let mut out = String::from("Latest tools\n");
    if entries.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }
    for e in entries {
        let _ = writeln!(
            out,
            "  {}  {} ({})",
            format_date(e.date_added),
            e.name,
            e.source.label()
        );
    }
    out
}

/// What: Render dashboard statistics.
///
/// Inputs:
/// - `stats`: Aggregates over the result set
///
/// Output:
/// - Summary lines followed by per-source and per-category counts.
#[must_use]
pub fn render_stats(stats: &DashboardStats) -> String {
    let mut out = String::from("Dashboard\n");
    let _ = writeln!(out, "  Total tools:     {}", stats.total);
    let _ = writeln!(out, "  New this week:   {}", stats.new_this_week);
    let popular = stats.most_popular.as_ref().map_or_else(
        || "-".to_string(),
        |e| format!("{} ({})", e.name, format_metric(e.metric)),
    );
    let _ = writeln!(out, "  Most popular:    {popular}");
    let _ = writeln!(
        out,
        "  Top category:    {}",
        stats.top_category.map_or("-", Category::label)
    );
    out.push_str("  By source:\n");
    for (s, n) in &stats.by_source {
        let _ = writeln!(out, "    {} {n}", fit_width(s.label(), 24));
    }
    out.push_str("  By category:\n");
    for (c, n) in &stats.by_category {
        let _ = writeln!(out, "    {} {n}", fit_width(c.label(), 24));
    }
    out
}

/// What: Serialize entries as a pretty JSON array of feed records.
///
/// Inputs:
/// - `entries`: Ordered results
///
/// Output:
/// - JSON text that `parse_feed` reads back into the same entries.
///
/// # Errors
/// - Propagates `serde_json` serialization failures.
pub fn render_json(entries: &[CatalogEntry]) -> serde_json::Result<String> {
    let records: Vec<FeedRecord> = entries.iter().map(FeedRecord::from).collect();
    serde_json::to_string_pretty(&records)
}
