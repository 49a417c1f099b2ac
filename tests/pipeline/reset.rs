//! Reset republishes the full catalog after the usual latency.

use std::time::Duration;

use aiscout::catalog::CatalogStore;
use aiscout::pipeline::{PipelineConfig, QueryPipeline};
use aiscout::state::{CriteriaAction, FilterCriteria, Source, TrendingFormula};
use chrono::{TimeZone, Utc};

#[tokio::test(start_paused = true)]
/// What: Reset after a narrowing query restores every entry in feed order
///
/// Inputs:
/// - News-only query, then reset
///
/// Output:
/// - One entry after the query; full catalog after reset; loading toggles both times.
async fn reset_restores_full_catalog() {
    let store = CatalogStore::sample();
    let pipeline = QueryPipeline::spawn(&store, PipelineConfig::default());
    let now = Utc
        .with_ymd_and_hms(2025, 4, 6, 0, 0, 0)
        .single()
        .expect("valid date");

    pipeline.query_at(
        FilterCriteria::default().reduce(CriteriaAction::ToggleSource(Source::News)),
        now,
    );
    let narrowed = pipeline.settled().await;
    assert_eq!(narrowed.results.len(), 1);

    let id = pipeline.reset();
    assert!(pipeline.snapshot().loading);
    assert_eq!(pipeline.snapshot().results.len(), 1);

    let full = pipeline.settled().await;
    assert_eq!(full.query_id, id);
    assert!(!full.loading);
    assert_eq!(&*full.results, store.entries());
}

#[tokio::test(start_paused = true)]
/// What: Reset supersedes a pending query
///
/// Inputs:
/// - News-only query immediately followed by reset, with a custom latency
///
/// Output:
/// - Full catalog published once the custom latency elapses.
async fn reset_supersedes_pending_query() {
    let store = CatalogStore::sample();
    let config = PipelineConfig {
        latency: Duration::from_millis(50),
        trending: TrendingFormula::Legacy,
    };
    let pipeline = QueryPipeline::spawn(&store, config);
    let start = tokio::time::Instant::now();

    pipeline.query(FilterCriteria::default().reduce(CriteriaAction::ToggleSource(Source::News)));
    let id = pipeline.reset();

    let state = pipeline.settled().await;
    assert_eq!(state.query_id, id);
    assert_eq!(state.results.len(), store.len());
    assert!(start.elapsed() >= Duration::from_millis(50));
    assert!(start.elapsed() < Duration::from_millis(500));
}
