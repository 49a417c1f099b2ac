//! Loading flag and stale-while-loading behavior.

use aiscout::catalog::CatalogStore;
use aiscout::pipeline::{PipelineConfig, QueryPipeline};
use aiscout::state::{Category, CriteriaAction, FilterCriteria, SortMode};

#[tokio::test(start_paused = true)]
/// What: Previous results stay visible while a new query is pending
///
/// Inputs:
/// - NLP query settled, then a Generative AI query
///
/// Output:
/// - While loading, results are still the three NLP entries; afterwards the two generative ones.
async fn loading_keeps_previous_results_visible() {
    let store = CatalogStore::sample();
    let pipeline = QueryPipeline::spawn(&store, PipelineConfig::default());

    pipeline.query(FilterCriteria::default().reduce(CriteriaAction::SetCategory(Category::Nlp, true)));
    let nlp = pipeline.settled().await;
    assert_eq!(nlp.results.len(), 3);

    pipeline.query(
        FilterCriteria::default()
            .reduce(CriteriaAction::SetCategory(Category::GenerativeAi, true))
            .reduce(CriteriaAction::SetSort(SortMode::Popular)),
    );
    let pending = pipeline.snapshot();
    assert!(pending.loading);
    assert_eq!(pending.query_id, nlp.query_id);
    assert!(std::sync::Arc::ptr_eq(&pending.results, &nlp.results));

    let generative = pipeline.settled().await;
    let names: Vec<&str> = generative.results.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["DALL-E 3 Mini", "AudioGen Pro"]);
}

#[tokio::test(start_paused = true)]
/// What: Empty catalog publishes an empty result with normal loading transitions
///
/// Inputs:
/// - Store with no entries; one query
///
/// Output:
/// - Loading true after submit; empty, non-loading state after settling.
async fn loading_empty_catalog() {
    let store = CatalogStore::default();
    let pipeline = QueryPipeline::spawn(&store, PipelineConfig::default());
    let id = pipeline.query(FilterCriteria::default());
    assert!(pipeline.snapshot().loading);
    let state = pipeline.settled().await;
    assert_eq!(state.query_id, id);
    assert!(!state.loading);
    assert!(state.results.is_empty());
}

#[tokio::test(start_paused = true)]
/// What: Subscribers observe the loading transition and its end
///
/// Inputs:
/// - Subscriber created before a query
///
/// Output:
/// - First change shows loading; a later change shows the published result.
async fn loading_transitions_visible_to_subscribers() {
    let store = CatalogStore::sample();
    let pipeline = QueryPipeline::spawn(&store, PipelineConfig::default());
    let mut rx = pipeline.subscribe();

    let id = pipeline.query(FilterCriteria::default());
    rx.changed().await.expect("sender alive");
    assert!(rx.borrow_and_update().loading);

    let done = rx
        .wait_for(|s| !s.loading)
        .await
        .expect("sender alive")
        .clone();
    assert_eq!(done.query_id, id);
    assert_eq!(done.results.len(), store.len());
}
