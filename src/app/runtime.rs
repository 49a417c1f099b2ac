use std::io::Write;

use chrono::{DateTime, Utc};

use crate::args::{OutputFormat, RunPlan};
use crate::catalog::CatalogStore;
use crate::logic::{dashboard_stats, latest};
use crate::pipeline::QueryPipeline;
use crate::state::QueryRequest;

use super::render;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Load the catalog selected by `plan`.
///
/// Inputs:
/// - `plan`: Resolved run plan
///
/// Output:
/// - Store from the configured feed, or the bundled sample when none is configured.
///
/// # Errors
/// - Returns the feed error when a configured file cannot be read or decoded.
pub fn load_store(plan: &RunPlan) -> Result<CatalogStore> {
    let store = match plan.catalog.as_deref() {
        Some(path) => {
            let store = CatalogStore::load(path)?;
            tracing::info!(path = %path.display(), entries = store.len(), "[Catalog] Feed loaded");
            store
        }
        None => {
            let store = CatalogStore::sample();
            tracing::info!(entries = store.len(), "[Catalog] Using bundled sample feed");
            store
        }
    };
    Ok(store)
}

/// What: Run one query end-to-end and print it to stdout.
///
/// Inputs:
/// - `plan`: Resolved run plan
///
/// Output:
/// - `Ok(())` once everything is printed.
///
/// # Errors
/// - Feed loading, serialization, or stdout write failures.
pub async fn run(plan: RunPlan) -> Result<()> {
    let store = load_store(&plan)?;
    let mut stdout = std::io::stdout();
    run_with_output(&plan, &store, Utc::now(), &mut stdout).await
}

/// What: Drive the pipeline for `plan` over `store`, writing to `out`.
///
/// Inputs:
/// - `plan`: Resolved run plan
/// - `store`: Loaded catalog
/// - `now`: Reference time for the query, stats, and latest list
/// - `out`: Destination writer
///
/// Output:
/// - `Ok(())` once the settled results (and any extra sections) are written.
///
/// Details:
/// - Grid output prints the loading placeholder while the query is pending.
/// - JSON output prints only the result array; stats and latest sections are skipped.
///
/// # Errors
/// - Serialization or write failures.
pub async fn run_with_output<W: Write + Send>(
    plan: &RunPlan,
    store: &CatalogStore,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<()> {
    let pipeline = QueryPipeline::spawn(store, plan.pipeline);
    let id = match &plan.request {
        QueryRequest::Reset => pipeline.reset(),
        QueryRequest::Apply(criteria) => pipeline.query_at(criteria.clone(), now),
    };

    if plan.format == OutputFormat::Grid && pipeline.snapshot().loading {
        writeln!(out, "{}", render::LOADING_PLACEHOLDER)?;
        out.flush()?;
    }

    let state = pipeline.settled().await;
    tracing::debug!(
        query_id = id,
        published = state.query_id,
        results = state.results.len(),
        "[Runtime] Query settled"
    );

    match plan.format {
        OutputFormat::Json => {
            if plan.stats || plan.latest.is_some() {
                tracing::warn!("[Runtime] --stats and --latest are ignored with --json");
            }
            writeln!(out, "{}", render::render_json(&state.results)?)?;
        }
        OutputFormat::Grid => {
            let sort = match &plan.request {
                QueryRequest::Apply(criteria) => Some(criteria.sort),
                QueryRequest::Reset => None,
            };
            write!(out, "{}", render::render_grid(&state.results, plan.tag_limit, sort))?;
            if let Some(n) = plan.latest {
                writeln!(out)?;
                write!(out, "{}", render::render_latest(&latest(store.entries(), n, now)))?;
            }
            if plan.stats {
                writeln!(out)?;
                write!(out, "{}", render::render_stats(&dashboard_stats(&state.results, now)))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
