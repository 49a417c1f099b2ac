use chrono::{DateTime, Utc};

use crate::state::{CatalogEntry, QueryRequest, TrendingFormula};

/// What: Compute the result list for one request, synchronously.
///
/// Inputs:
/// - `entries`: Full, immutable entry set
/// - `request`: Apply criteria or reset
/// - `now`: Reference time for date windows and trending
/// - `formula`: Trending formula
///
/// Output:
/// - New ordered vector; `entries` is never modified.
///
/// Details:
/// - Apply filters first, then ranks the survivors.
/// - Reset returns the full set in feed order, ignoring any criteria.
/// - For fixed `entries` and `now` this is a pure function of `request`.
#[must_use]
pub fn run_query(
    entries: &[CatalogEntry],
    request: &QueryRequest,
    now: DateTime<Utc>,
    formula: TrendingFormula,
) -> Vec<CatalogEntry> {
    match request {
        QueryRequest::Reset => entries.to_vec(),
        QueryRequest::Apply(criteria) => {
            let filtered = super::filter::filter_entries(entries, criteria, now);
            super::sort::rank(filtered, criteria.sort, now, formula)
        }
    }
}
