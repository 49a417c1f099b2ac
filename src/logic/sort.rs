use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::state::{CatalogEntry, SortMode, TrendingFormula};

/// Thirty days in milliseconds, the offset subtracted from `now` by the legacy trending formula.
pub const THIRTY_DAYS_MS: i64 = 30 * 24 * 60 * 60 * 1000;

const DAY_MS: f64 = 86_400_000.0;

/// What: Compute the trending score of one entry.
///
/// Inputs:
/// - `entry`: Entry to score
/// - `now`: Reference time
/// - `formula`: Scoring formula
///
/// Output:
/// - Finite score; never NaN. Legacy scores are negative for entries dated before 1970.
///
/// Details:
/// - Legacy: `popularity * dateAdded_ms / (now_ms - THIRTY_DAYS_MS)`. This divides an
///   absolute timestamp by another one, so it is close to 1.0 for any recent entry and is
///   not a bounded decay. A non-positive denominator yields 0.
/// - Decay: `popularity * 0.5^(age_days / half_life_days)`, future dates counted as age 0.
/// - Entries without a discovery date score 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trending_score(entry: &CatalogEntry, now: DateTime<Utc>, formula: TrendingFormula) -> f64 {
    let Some(added_ms) = entry.date_added_ms() else {
        return 0.0;
    };
    let popularity = entry.popularity() as f64;
    let now_ms = now.timestamp_millis();
    match formula {
        TrendingFormula::Legacy => {
            let denominator = now_ms - THIRTY_DAYS_MS;
            if denominator <= 0 {
                return 0.0;
            }
            popularity * (added_ms as f64 / denominator as f64)
        }
        TrendingFormula::Decay { half_life_days } => {
            if half_life_days <= 0.0 || !half_life_days.is_finite() {
                return popularity;
            }
            let age_days = (now_ms - added_ms).max(0) as f64 / DAY_MS;
            popularity * 0.5_f64.powf(age_days / half_life_days)
        }
    }
}

/// What: Produce a new ordering of `entries` under `mode`.
///
/// Inputs:
/// - `entries`: Entries to order (consumed)
/// - `mode`: Ranking strategy
/// - `now`: Reference time for trending
/// - `formula`: Trending formula
///
/// Output:
/// - The same entries, reordered.
///
/// Details:
/// - Every strategy is a stable sort: ties keep their input order.
/// - Newest: descending discovery time, undated entries last.
/// - Popular: descending popularity (stars, else downloads, else citations, else 0).
/// - Trending: dated entries first by descending [`trending_score`], undated entries last.
/// - Alphabetical: ascending name under [`crate::util::collate::compare`].
#[must_use]
pub fn rank(
    mut entries: Vec<CatalogEntry>,
    mode: SortMode,
    now: DateTime<Utc>,
    formula: TrendingFormula,
) -> Vec<CatalogEntry> {
    match mode {
        SortMode::Newest => {
            // `None < Some(_)`, so reversing puts undated entries last.
            entries.sort_by(|a, b| b.date_added.cmp(&a.date_added));
            entries
        }
        SortMode::Popular => {
            entries.sort_by(|a, b| b.popularity().cmp(&a.popularity()));
            entries
        }
        SortMode::Trending => {
            let mut scored: Vec<(bool, f64, CatalogEntry)> = entries
                .into_iter()
                .map(|e| (e.date_added.is_some(), trending_score(&e, now, formula), e))
                .collect();
            scored.sort_by(|(da, sa, _), (db, sb, _)| {
                db.cmp(da)
                    .then_with(|| sb.partial_cmp(sa).unwrap_or(Ordering::Equal))
            });
            scored.into_iter().map(|(_, _, e)| e).collect()
        }
        SortMode::Alphabetical => {
            entries.sort_by(|a, b| crate::util::collate::compare(&a.name, &b.name));
            entries
        }
    }
}
