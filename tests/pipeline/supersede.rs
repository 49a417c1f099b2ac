//! Newer submissions replace pending ones; superseded results are never published.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use aiscout::catalog::CatalogStore;
use aiscout::pipeline::{DEFAULT_LATENCY, PipelineConfig, QueryPipeline};
use aiscout::state::{Category, CriteriaAction, FilterCriteria, SortMode};
use chrono::{DateTime, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 6, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn nlp() -> FilterCriteria {
    FilterCriteria::default().reduce(CriteriaAction::SetCategory(Category::Nlp, true))
}

fn vision() -> FilterCriteria {
    FilterCriteria::default()
        .reduce(CriteriaAction::SetCategory(Category::ComputerVision, true))
        .reduce(CriteriaAction::SetSort(SortMode::Alphabetical))
}

#[tokio::test(start_paused = true)]
/// What: Two rapid queries publish only the second result
///
/// Inputs:
/// - NLP query immediately followed by a Computer Vision query
///
/// Output:
/// - Exactly one publication, carrying the second id and the two vision entries.
async fn supersede_rapid_queries_publish_latest_only() {
    let store = CatalogStore::sample();
    let pipeline = QueryPipeline::spawn(&store, PipelineConfig::default());

    let published: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
    let mut rx = pipeline.subscribe();
    let sink = Arc::clone(&published);
    let recorder = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if !state.loading {
                sink.lock().expect("recorder lock").push(state.query_id);
            }
        }
    });

    let first = pipeline.query_at(nlp(), now());
    let second = pipeline.query_at(vision(), now());
    assert!(second > first);

    let state = pipeline.settled().await;
    assert_eq!(state.query_id, second);
    let names: Vec<&str> = state.results.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["EfficientDet-X", "Neural3D"]);

    // Give any stray publication a chance to land before checking.
    tokio::time::sleep(DEFAULT_LATENCY * 2).await;
    assert_eq!(*published.lock().expect("recorder lock"), vec![second]);
    assert_eq!(pipeline.snapshot().query_id, second);
    recorder.abort();
}

#[tokio::test(start_paused = true)]
/// What: A submission within the latency window restarts the wait
///
/// Inputs:
/// - Query at t=0, second query at t=300ms, latency 500ms
///
/// Output:
/// - Still loading at t=600ms; published at t>=800ms with the second id.
async fn supersede_restarts_latency() {
    let store = CatalogStore::sample();
    let pipeline = QueryPipeline::spawn(&store, PipelineConfig::default());
    let start = tokio::time::Instant::now();

    pipeline.query_at(nlp(), now());
    tokio::time::sleep(Duration::from_millis(300)).await;
    let second = pipeline.query_at(vision(), now());
    tokio::time::sleep(Duration::from_millis(300)).await;

    let mid = pipeline.snapshot();
    assert!(mid.loading);
    assert_eq!(mid.query_id, 0);

    let state = pipeline.settled().await;
    assert_eq!(state.query_id, second);
    assert!(start.elapsed() >= Duration::from_millis(800));
}

#[tokio::test(start_paused = true)]
/// What: Sequential queries each publish once latency elapses
///
/// Inputs:
/// - NLP query, wait until settled, then vision query
///
/// Output:
/// - Two distinct published states in submission order.
async fn supersede_sequential_queries_both_publish() {
    let store = CatalogStore::sample();
    let pipeline = QueryPipeline::spawn(&store, PipelineConfig::default());

    let a = pipeline.query_at(nlp(), now());
    let first = pipeline.settled().await;
    assert_eq!(first.query_id, a);
    assert_eq!(first.results.len(), 3);

    let b = pipeline.query_at(vision(), now());
    let second = pipeline.settled().await;
    assert_eq!(second.query_id, b);
    assert_eq!(second.results.len(), 2);
}
