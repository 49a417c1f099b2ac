use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::{
    select,
    sync::{mpsc, watch},
    task::JoinHandle,
    time::sleep,
};

use super::PipelineConfig;
use crate::logic::run_query;
use crate::state::{CatalogEntry, PipelineState, QueryInput};

/// What: Spawn the background worker that owns the pending query.
///
/// Inputs:
/// - `entries`: Immutable catalog the worker queries
/// - `query_rx`: Channel receiver for submitted queries
/// - `state_tx`: Watch sender holding the published state
/// - `latest_id`: Id of the most recently submitted query
/// - `config`: Latency and trending formula
///
/// Output:
/// - Join handle of the spawned task.
///
/// Details:
/// - Waits `config.latency` after the last submission; a newer query arriving
///   within that window replaces the pending one and restarts the wait.
/// - Publishes only when the finished query is still the latest one. The check
///   runs inside the watch update so a concurrent submission cannot slip in
///   between check and publish.
/// - Exits when the submitting side is dropped.
pub(super) fn spawn_query_worker(
    entries: Arc<[CatalogEntry]>,
    mut query_rx: mpsc::UnboundedReceiver<QueryInput>,
    state_tx: Arc<watch::Sender<PipelineState>>,
    latest_id: Arc<AtomicU64>,
    config: PipelineConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let Some(mut pending) = query_rx.recv().await else {
                break;
            };
            loop {
                select! {
                    biased;
                    newer = query_rx.recv() => match newer {
                        Some(q) => {
                            tracing::debug!(
                                superseded = pending.id,
                                by = q.id,
                                "[Pipeline] Pending query superseded"
                            );
                            pending = q;
                        }
                        None => {
                            tracing::debug!("[Pipeline] Query worker exiting (channel closed)");
                            return;
                        }
                    },
                    () = sleep(config.latency) => break,
                }
            }

            if pending.id != latest_id.load(Ordering::SeqCst) {
                tracing::debug!(query_id = pending.id, "[Pipeline] Dropping stale query");
                continue;
            }

            let results: Arc<[CatalogEntry]> =
                run_query(&entries, &pending.request, pending.now, config.trending).into();
            let count = results.len();
            let id = pending.id;
            let published = state_tx.send_if_modified(|state| {
                if id != latest_id.load(Ordering::SeqCst) {
                    return false;
                }
                state.query_id = id;
                state.results = results;
                state.loading = false;
                true
            });
            if published {
                tracing::info!(query_id = id, results = count, "[Pipeline] Results published");
            } else {
                tracing::debug!(query_id = id, "[Pipeline] Superseded before publish");
            }
        }
        tracing::debug!("[Pipeline] Query worker exiting (channel closed)");
    })
}
