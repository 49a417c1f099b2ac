//! Read-only dashboard aggregates over a result list.

use chrono::{DateTime, Duration, Utc};

use crate::state::{CatalogEntry, Category, SortMode, Source, TrendingFormula};

/// Summary figures shown above the tools grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Number of entries considered.
    pub total: usize,
    /// Entries discovered in the last seven days.
    pub new_this_week: usize,
    /// Entry with the highest popularity, first one on ties.
    pub most_popular: Option<CatalogEntry>,
    /// Category holding the most entries; earlier categories win ties.
    pub top_category: Option<Category>,
    /// Count per source, in [`Source::ALL`] order, zero rows included.
    pub by_source: Vec<(Source, usize)>,
    /// Count per category, in [`Category::ALL`] order, zero rows included.
    pub by_category: Vec<(Category, usize)>,
}

/// What: Aggregate dashboard figures for `entries`.
///
/// Inputs:
/// - `entries`: Entries to summarize
/// - `now`: Reference time for the seven-day window
///
/// Output:
/// - [`DashboardStats`]; all counts zero and options `None` for an empty slice.
#[must_use]
pub fn dashboard_stats(entries: &[CatalogEntry], now: DateTime<Utc>) -> DashboardStats {
    let week_ago = now - Duration::days(7);
    let new_this_week = entries
        .iter()
        .filter(|e| e.date_added.is_some_and(|d| d >= week_ago))
        .count();

    let mut most_popular: Option<&CatalogEntry> = None;
    for e in entries {
        if most_popular.is_none_or(|best| e.popularity() > best.popularity()) {
            most_popular = Some(e);
        }
    }

    let by_source: Vec<(Source, usize)> = Source::ALL
        .iter()
        .map(|s| (*s, entries.iter().filter(|e| e.source == *s).count()))
        .collect();
    let by_category: Vec<(Category, usize)> = Category::ALL
        .iter()
        .map(|c| (*c, entries.iter().filter(|e| e.category == *c).count()))
        .collect();

    let mut top_category: Option<(Category, usize)> = None;
    for &(c, n) in &by_category {
        if n > 0 && top_category.is_none_or(|(_, best)| n > best) {
            top_category = Some((c, n));
        }
    }

    DashboardStats {
        total: entries.len(),
        new_this_week,
        most_popular: most_popular.cloned(),
        top_category: top_category.map(|(c, _)| c),
        by_source,
        by_category,
    }
}

/// What: The `limit` most recently discovered entries.
///
/// Inputs:
/// - `entries`: Entries to choose from
/// - `limit`: Maximum number returned
/// - `now`: Reference time (unused by the newest strategy, kept for a uniform call shape)
///
/// Output:
/// - Up to `limit` entries, newest first, undated last.
#[must_use]
pub fn latest(entries: &[CatalogEntry], limit: usize, now: DateTime<Utc>) -> Vec<CatalogEntry> {
    let mut out = super::sort::rank(
        entries.to_vec(),
        SortMode::Newest,
        now,
        TrendingFormula::Legacy,
    );
    out.truncate(limit);
    out
}
