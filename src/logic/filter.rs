use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::state::{CatalogEntry, FilterCriteria};

/// Shorter search terms match by substring only; fuzzy subsequences of one or
/// two letters hit most names.
const FUZZY_MIN_CHARS: usize = 3;

/// Filter criteria prepared for evaluating many entries.
///
/// Lowercases the search term, resolves the date window against `now`, and
/// holds one fuzzy matcher so per-entry checks allocate nothing but the
/// lowercase haystacks.
pub struct Predicate<'a> {
    criteria: &'a FilterCriteria,
    search: String,
    cutoff: Option<DateTime<Utc>>,
    matcher: SkimMatcherV2,
}

impl<'a> Predicate<'a> {
    /// What: Prepare `criteria` for evaluation at time `now`.
    ///
    /// Inputs:
    /// - `criteria`: Selected categories, sources, search text, and window
    /// - `now`: Reference time for the date window
    ///
    /// Output:
    /// - Reusable predicate.
    #[must_use]
    pub fn new(criteria: &'a FilterCriteria, now: DateTime<Utc>) -> Self {
        Self {
            criteria,
            search: criteria.search.trim().to_lowercase(),
            cutoff: criteria.window.cutoff(now),
            matcher: SkimMatcherV2::default(),
        }
    }

    /// What: Decide whether `entry` stays in the result set.
    ///
    /// Inputs:
    /// - `entry`: Catalog entry to test
    ///
    /// Output:
    /// - `true` iff every dimension matches.
    ///
    /// Details:
    /// - Within a dimension selections are any-of; across dimensions they are all-of.
    /// - Empty category or source sets do not restrict.
    /// - Entries without a discovery date fall outside every bounded window.
    #[must_use]
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        let category_ok =
            self.criteria.categories.is_empty() || self.criteria.categories.contains(&entry.category);
        let source_ok =
            self.criteria.sources.is_empty() || self.criteria.sources.contains(&entry.source);
        category_ok && source_ok && self.window_ok(entry) && self.search_ok(entry)
    }

    fn window_ok(&self, entry: &CatalogEntry) -> bool {
        match (self.cutoff, entry.date_added) {
            (None, _) => true,
            (Some(cutoff), Some(added)) => added >= cutoff,
            (Some(_), None) => false,
        }
    }

    /// Substring match on name, author, and tags; fuzzy name match only for
    /// terms of at least [`FUZZY_MIN_CHARS`] characters.
    fn search_ok(&self, entry: &CatalogEntry) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let q = self.search.as_str();
        if entry.name.to_lowercase().contains(q)
            || entry.author.to_lowercase().contains(q)
            || entry.tags.iter().any(|t| t.to_lowercase().contains(q))
        {
            return true;
        }
        q.chars().count() >= FUZZY_MIN_CHARS
            && crate::util::fuzzy_match_rank_with_matcher(&entry.name, q, &self.matcher).is_some()
    }
}

/// What: Single-entry convenience wrapper around [`Predicate`].
///
/// Inputs:
/// - `entry`: Catalog entry to test
/// - `criteria`: Filter criteria
/// - `now`: Reference time for the date window
///
/// Output:
/// - `true` if the entry should remain in the result set.
#[must_use]
pub fn matches(entry: &CatalogEntry, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    Predicate::new(criteria, now).matches(entry)
}

/// What: Keep the entries that satisfy `criteria`, preserving input order.
///
/// Inputs:
/// - `entries`: Full entry set
/// - `criteria`: Filter criteria
/// - `now`: Reference time for the date window
///
/// Output:
/// - New vector of cloned matching entries; `entries` is untouched.
#[must_use]
pub fn filter_entries(
    entries: &[CatalogEntry],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<CatalogEntry> {
    if criteria.is_unrestricted() {
        return entries.to_vec();
    }
    let predicate = Predicate::new(criteria, now);
    let mut filtered: Vec<CatalogEntry> = Vec::with_capacity(entries.len());
    for it in entries.iter().filter(|e| predicate.matches(e)) {
        filtered.push(it.clone());
    }
    filtered
}
