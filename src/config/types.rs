use std::path::PathBuf;

use crate::state::{SortMode, TrendingFormula};

/// Default number of entries shown by `--latest` when no count is given.
pub const DEFAULT_LATEST_LIMIT: usize = 5;
/// Default number of tags shown per card before the `+N` overflow marker.
pub const DEFAULT_TAG_DISPLAY_LIMIT: usize = 3;
/// Default half-life for the decay trending formula.
pub const DEFAULT_HALF_LIFE_DAYS: f64 = 7.0;

/// User-configurable application settings parsed from `settings.conf`.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Sort strategy used when the command line does not pick one.
    pub sort_mode: SortMode,
    /// Simulated latency between a query submission and its publication.
    pub query_latency_ms: u64,
    /// Catalog feed to load; the bundled sample is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Number of entries shown by the latest-tools list.
    pub latest_limit: usize,
    /// Number of tags printed per entry before the overflow count.
    pub tag_display_limit: usize,
    /// Scoring formula for the trending strategy.
    pub trending_formula: TrendingFormula,
    /// Half-life used when `trending_formula` is the decay formula.
    pub trending_half_life_days: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sort_mode: SortMode::Newest,
            query_latency_ms: 500,
            catalog_path: None,
            latest_limit: DEFAULT_LATEST_LIMIT,
            tag_display_limit: DEFAULT_TAG_DISPLAY_LIMIT,
            trending_formula: TrendingFormula::Legacy,
            trending_half_life_days: DEFAULT_HALF_LIFE_DAYS,
        }
    }
}
