//! Properties that must hold for every criteria combination.

use aiscout::catalog::CatalogStore;
use aiscout::logic::{filter_entries, rank, run_query};
use aiscout::state::{
    CatalogEntry, Category, CriteriaAction, DateWindow, FilterCriteria, Metric, QueryRequest,
    SortMode, Source, TrendingFormula,
};
use chrono::{DateTime, TimeZone, Utc};

const MODES: [SortMode; 4] = [
    SortMode::Newest,
    SortMode::Popular,
    SortMode::Trending,
    SortMode::Alphabetical,
];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 6, 0, 0, 0)
        .single()
        .expect("valid date")
}

/// Every criteria value built from single category and source picks, each window, and each mode.
fn criteria_grid() -> Vec<FilterCriteria> {
    let mut out = Vec::new();
    let categories: Vec<Option<Category>> =
        std::iter::once(None).chain(Category::ALL.into_iter().map(Some)).collect();
    let sources: Vec<Option<Source>> =
        std::iter::once(None).chain(Source::ALL.into_iter().map(Some)).collect();
    for c in &categories {
        for s in &sources {
            for w in [DateWindow::AllTime, DateWindow::Last7Days] {
                for m in MODES {
                    let mut criteria = FilterCriteria::default()
                        .reduce(CriteriaAction::SetSort(m))
                        .reduce(CriteriaAction::SetWindow(w));
                    if let Some(c) = c {
                        criteria = criteria.reduce(CriteriaAction::SetCategory(*c, true));
                    }
                    if let Some(s) = s {
                        criteria = criteria.reduce(CriteriaAction::SetSource(*s, true));
                    }
                    out.push(criteria);
                }
            }
        }
    }
    out
}

#[test]
/// What: Results are always a subset of the catalog and the catalog is untouched
///
/// Inputs:
/// - Bundled sample and every criteria combination in the grid
///
/// Output:
/// - Every result entry exists in the store, ids are unique, store contents unchanged.
fn property_results_subset_of_entries() {
    let store = CatalogStore::sample();
    let before: Vec<CatalogEntry> = store.entries().to_vec();
    for criteria in criteria_grid() {
        let out = run_query(
            store.entries(),
            &QueryRequest::Apply(criteria.clone()),
            now(),
            TrendingFormula::Legacy,
        );
        assert!(out.len() <= store.len());
        let mut ids: Vec<&str> = out.iter().map(|e| e.id.as_str()).collect();
        for e in &out {
            assert_eq!(store.get(&e.id), Some(e), "{criteria:?}");
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), out.len());
    }
    assert_eq!(store.entries(), before.as_slice());
}

#[test]
/// What: Empty criteria is the identity filter
///
/// Inputs:
/// - Default criteria over the sample
///
/// Output:
/// - Same entries in feed order.
fn property_empty_criteria_identity() {
    let store = CatalogStore::sample();
    let out = filter_entries(store.entries(), &FilterCriteria::default(), now());
    assert_eq!(out.as_slice(), store.entries());
}

#[test]
/// What: Sorting a sorted list changes nothing for any strategy
///
/// Inputs:
/// - Sample sorted once by each mode
///
/// Output:
/// - Second pass equals the first.
fn property_sorting_is_idempotent() {
    let store = CatalogStore::sample();
    for mode in MODES {
        let once = rank(store.entries().to_vec(), mode, now(), TrendingFormula::Legacy);
        let twice = rank(once.clone(), mode, now(), TrendingFormula::Legacy);
        assert_eq!(once, twice, "{mode:?}");
    }
}

#[test]
/// What: Equal popularity keeps input order
///
/// Inputs:
/// - Ten entries sharing two popularity values, interleaved
///
/// Output:
/// - Within each popularity value the input order is preserved.
fn property_popular_stable_on_ties() {
    let entries: Vec<CatalogEntry> = (0..10)
        .map(|i| CatalogEntry {
            id: format!("e{i}"),
            name: format!("e{i}"),
            description: String::new(),
            source: Source::CodeHost,
            category: Category::Other,
            url: String::new(),
            metric: Some(if i % 2 == 0 {
                Metric::Stars(10)
            } else {
                Metric::Downloads(20)
            }),
            date_added: None,
            author: String::new(),
            tags: Vec::new(),
        })
        .collect();
    let out = rank(entries, SortMode::Popular, now(), TrendingFormula::Legacy);
    let ids: Vec<&str> = out.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["e1", "e3", "e5", "e7", "e9", "e0", "e2", "e4", "e6", "e8"]
    );
}

#[test]
/// What: Reset returns the full catalog regardless of prior criteria
///
/// Inputs:
/// - Sample; reset request
///
/// Output:
/// - Every entry in feed order.
fn property_reset_returns_full_set() {
    let store = CatalogStore::sample();
    let out = run_query(
        store.entries(),
        &QueryRequest::Reset,
        now(),
        TrendingFormula::Decay {
            half_life_days: 1.0,
        },
    );
    assert_eq!(out.as_slice(), store.entries());
}
