//! Asynchronous query pipeline.
//!
//! Submissions flip the published `loading` flag immediately; a single
//! background task waits out the simulated latency, computes filter-then-sort
//! over the immutable catalog, and publishes results and `loading = false` in
//! one watch update. Newer submissions supersede older pending ones.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::catalog::CatalogStore;
use crate::config::Settings;
use crate::state::{FilterCriteria, PipelineState, QueryInput, QueryRequest, TrendingFormula};

mod worker;

/// Default simulated latency between submission and publication.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Runtime knobs for a [`QueryPipeline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Delay between the last submission and publication.
    pub latency: Duration,
    /// Formula used by the trending strategy.
    pub trending: TrendingFormula,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            trending: TrendingFormula::Legacy,
        }
    }
}

impl From<&Settings> for PipelineConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            latency: Duration::from_millis(settings.query_latency_ms),
            trending: settings.trending_formula,
        }
    }
}

/// Handle to a running query pipeline.
///
/// Dropping the handle stops the background worker.
pub struct QueryPipeline {
    /// Channel feeding the worker.
    query_tx: mpsc::UnboundedSender<QueryInput>,
    /// Published state, shared with the worker.
    state_tx: Arc<watch::Sender<PipelineState>>,
    /// Id of the most recently submitted query.
    latest_id: Arc<AtomicU64>,
    /// Worker task.
    worker: JoinHandle<()>,
}

impl QueryPipeline {
    /// What: Start a pipeline over `store`.
    ///
    /// Inputs:
    /// - `store`: Catalog to query
    /// - `config`: Latency and trending formula
    ///
    /// Output:
    /// - Running pipeline whose initial state shows the full catalog, not loading.
    ///
    /// Details:
    /// - Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(store: &CatalogStore, config: PipelineConfig) -> Self {
        let (query_tx, query_rx) = mpsc::unbounded_channel::<QueryInput>();
        let (state_tx, _) = watch::channel(PipelineState {
            query_id: 0,
            results: store.shared(),
            loading: false,
        });
        let state_tx = Arc::new(state_tx);
        let latest_id = Arc::new(AtomicU64::new(0));
        let worker = worker::spawn_query_worker(
            store.shared(),
            query_rx,
            Arc::clone(&state_tx),
            Arc::clone(&latest_id),
            config,
        );
        tracing::debug!(
            entries = store.len(),
            latency_ms = config.latency.as_millis(),
            "[Pipeline] Query worker started"
        );
        Self {
            query_tx,
            state_tx,
            latest_id,
            worker,
        }
    }

    /// What: Submit `criteria`, capturing the current time.
    ///
    /// Output:
    /// - Id assigned to this submission.
    pub fn query(&self, criteria: FilterCriteria) -> u64 {
        self.submit(QueryRequest::Apply(criteria), Utc::now())
    }

    /// What: Submit `criteria` evaluated at a fixed `now`.
    ///
    /// Inputs:
    /// - `criteria`: Filter and sort selection
    /// - `now`: Reference time for trending and date windows
    ///
    /// Output:
    /// - Id assigned to this submission.
    pub fn query_at(&self, criteria: FilterCriteria, now: DateTime<Utc>) -> u64 {
        self.submit(QueryRequest::Apply(criteria), now)
    }

    /// What: Republish the full catalog in feed order after the usual latency.
    ///
    /// Output:
    /// - Id assigned to this submission.
    pub fn reset(&self) -> u64 {
        self.submit(QueryRequest::Reset, Utc::now())
    }

    /// Assign the next id, flip `loading`, and hand the request to the worker.
    fn submit(&self, request: QueryRequest, now: DateTime<Utc>) -> u64 {
        let id = self.latest_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.state_tx.send_modify(|state| state.loading = true);
        tracing::debug!(
            query_id = id,
            reset = matches!(request, QueryRequest::Reset),
            "[Pipeline] Query submitted"
        );
        if self
            .query_tx
            .send(QueryInput { id, request, now })
            .is_err()
        {
            tracing::warn!(query_id = id, "[Pipeline] Query worker is gone; request dropped");
        }
        id
    }

    /// Current published state. While loading, `results` still holds the previous list.
    #[must_use]
    pub fn snapshot(&self) -> PipelineState {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state_tx.subscribe()
    }

    /// Id of the most recent submission; 0 before the first one.
    #[must_use]
    pub fn latest_id(&self) -> u64 {
        self.latest_id.load(Ordering::SeqCst)
    }

    /// What: Wait until the most recent submission has been published.
    ///
    /// Output:
    /// - The published state, `loading == false`.
    ///
    /// Details:
    /// - Returns immediately when nothing was submitted yet.
    /// - Falls back to the current snapshot if the state channel closes.
    pub async fn settled(&self) -> PipelineState {
        let target = self.latest_id();
        let mut rx = self.state_tx.subscribe();
        match rx
            .wait_for(|state| !state.loading && state.query_id >= target)
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }
}

impl Drop for QueryPipeline {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
