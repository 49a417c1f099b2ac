//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::pipeline::PipelineConfig;
use crate::state::{CriteriaAction, DateWindow, FilterCriteria, LabelError, QueryRequest, SortMode};

/// aiscout - Browse a catalog of AI tools and models from the command line
#[derive(Parser, Debug, Default)]
#[command(name = "aiscout")]
#[command(version)]
#[command(about = "Filter and rank a catalog of AI tools, models, and papers", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Catalog feed to load (JSON); defaults to `catalog_path` in settings, then the bundled sample
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Restrict to a category (repeatable, e.g. -c NLP -c "Computer Vision")
    #[arg(short, long = "category", value_name = "LABEL")]
    pub categories: Vec<String>,

    /// Restrict to a source (repeatable, e.g. -s GitHub -s "Hugging Face")
    #[arg(short, long = "source", value_name = "LABEL")]
    pub sources: Vec<String>,

    /// Sort strategy (newest, popular, trending, alphabetical)
    #[arg(long, value_name = "MODE")]
    pub sort: Option<String>,

    /// Free-text search over name, author, and tags
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Only entries discovered within a window (24h, 7d, 30d, year, all)
    #[arg(long, value_name = "WINDOW")]
    pub since: Option<String>,

    /// Show the N most recently discovered tools (defaults to `latest_limit`)
    #[arg(long, value_name = "N", num_args = 0..=1)]
    pub latest: Option<Option<usize>>,

    /// Print dashboard statistics for the result set
    #[arg(long)]
    pub stats: bool,

    /// Print results as JSON feed records
    #[arg(long)]
    pub json: bool,

    /// Ignore filters and list the full catalog in feed order
    #[arg(long)]
    pub reset: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable rows.
    Grid,
    /// JSON array of feed records.
    Json,
}

/// Everything the runtime needs, resolved from arguments and settings.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Feed to load; `None` uses the bundled sample.
    pub catalog: Option<PathBuf>,
    /// Query to submit to the pipeline.
    pub request: QueryRequest,
    /// Entry count for the latest-tools list, if requested.
    pub latest: Option<usize>,
    /// Whether to print dashboard statistics.
    pub stats: bool,
    /// Output format.
    pub format: OutputFormat,
    /// Tags shown per entry before the overflow count.
    pub tag_limit: usize,
    /// Pipeline latency and trending formula.
    pub pipeline: PipelineConfig,
}

/// What: Resolve arguments and settings into a [`RunPlan`].
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Loaded user settings.
///
/// Output:
/// - The plan, or the first unknown label encountered.
///
/// Details:
/// - Command-line values override settings; the sort falls back to `settings.sort_mode`.
/// - Labels are validated here so unknown values never reach the query logic.
/// - `--reset` ignores every filter flag.
pub fn process_args(args: &Args, settings: &Settings) -> Result<RunPlan, LabelError> {
    let request = if args.reset {
        QueryRequest::Reset
    } else {
        let sort = match args.sort.as_deref() {
            Some(s) => s.parse::<SortMode>()?,
            None => settings.sort_mode,
        };
        let window = match args.since.as_deref() {
            Some(w) => w.parse::<DateWindow>()?,
            None => DateWindow::AllTime,
        };
        let criteria =
            FilterCriteria::from_labels(args.categories.as_slice(), args.sources.as_slice())?
                .reduce(CriteriaAction::SetSort(sort))
                .reduce(CriteriaAction::SetWindow(window))
                .reduce(CriteriaAction::SetSearch(
                    args.query.clone().unwrap_or_default(),
                ));
        QueryRequest::Apply(criteria)
    };

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Grid
    };

    Ok(RunPlan {
        catalog: args.catalog.clone().or_else(|| settings.catalog_path.clone()),
        request,
        latest: args.latest.map(|n| n.unwrap_or(settings.latest_limit)),
        stats: args.stats,
        format,
        tag_limit: settings.tag_display_limit,
        pipeline: PipelineConfig::from(settings),
    })
}
