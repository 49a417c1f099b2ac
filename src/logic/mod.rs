//! Core query logic: filtering, ranking, and dashboard aggregates.

pub mod filter;
pub mod query;
pub mod sort;
pub mod stats;

// Re-export public APIs so callers can use `crate::logic::...`
pub use filter::{Predicate, filter_entries, matches};
pub use query::run_query;
pub use sort::{THIRTY_DAYS_MS, rank, trending_score};
pub use stats::{DashboardStats, dashboard_stats, latest};
