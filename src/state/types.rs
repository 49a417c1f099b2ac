//! Core value types used by the catalog pipeline.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// What: Canonicalize a user-facing label for case-insensitive lookup.
///
/// Inputs:
/// - `s`: Raw label such as `"Hugging Face"`, `"hugging-face"`, or `"huggingface"`.
///
/// Output:
/// - Lowercase string with whitespace, `-`, and `_` removed.
fn label_key(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Rejection raised when a user-supplied label does not name a known value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// Label did not match any [`Category`].
    UnknownCategory(String),
    /// Label did not match any [`Source`].
    UnknownSource(String),
    /// Label did not match any [`SortMode`].
    UnknownSortMode(String),
    /// Label did not match any [`DateWindow`].
    UnknownWindow(String),
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(s) => write!(
                f,
                "unknown category \"{s}\" (expected one of: {})",
                Category::ALL.map(Category::label).join(", ")
            ),
            Self::UnknownSource(s) => write!(
                f,
                "unknown source \"{s}\" (expected one of: {})",
                Source::ALL.map(Source::label).join(", ")
            ),
            Self::UnknownSortMode(s) => write!(
                f,
                "unknown sort mode \"{s}\" (expected newest, popular, trending or alphabetical)"
            ),
            Self::UnknownWindow(s) => {
                write!(f, "unknown date window \"{s}\" (expected 24h, 7d, 30d, year or all)")
            }
        }
    }
}

impl std::error::Error for LabelError {}

/// Origin a catalog entry was discovered from.
///
/// Shared by criteria construction and predicate evaluation so that source
/// matching never depends on display-label capitalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    /// Code hosting (GitHub).
    CodeHost,
    /// Model hub (Hugging Face).
    ModelHub,
    /// Preprint server (arXiv).
    Preprint,
    /// News coverage.
    News,
}

impl Source {
    /// Every source in display order.
    pub const ALL: [Self; 4] = [Self::CodeHost, Self::ModelHub, Self::Preprint, Self::News];

    /// Key used by the catalog feed (`"github"`, `"huggingface"`, ...).
    #[must_use]
    pub const fn as_feed_key(self) -> &'static str {
        match self {
            Self::CodeHost => "github",
            Self::ModelHub => "huggingface",
            Self::Preprint => "arxiv",
            Self::News => "news",
        }
    }

    /// Display label shown in filter panels.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CodeHost => "GitHub",
            Self::ModelHub => "Hugging Face",
            Self::Preprint => "ArXiv",
            Self::News => "News",
        }
    }

    /// What: Resolve a feed key, display label, or alias to a [`Source`].
    ///
    /// Inputs:
    /// - `s`: Label in any case; spaces, `-` and `_` are ignored.
    ///
    /// Output:
    /// - `Some(Source)` when recognized; `None` otherwise.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        match label_key(s).as_str() {
            "github" | "codehost" | "code" => Some(Self::CodeHost),
            "huggingface" | "hf" | "modelhub" | "hub" => Some(Self::ModelHub),
            "arxiv" | "preprint" | "paper" | "papers" => Some(Self::Preprint),
            "news" => Some(Self::News),
            _ => None,
        }
    }
}

impl FromStr for Source {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| LabelError::UnknownSource(s.to_string()))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Topic a catalog entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Natural language processing.
    Nlp,
    /// Computer vision.
    ComputerVision,
    /// Multi-modal models.
    MultiModal,
    /// Generative AI.
    GenerativeAi,
    /// Reinforcement learning.
    ReinforcementLearning,
    /// Anything else, including unrecognized feed values.
    Other,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Self; 6] = [
        Self::Nlp,
        Self::ComputerVision,
        Self::MultiModal,
        Self::GenerativeAi,
        Self::ReinforcementLearning,
        Self::Other,
    ];

    /// Display label, identical to the feed value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nlp => "NLP",
            Self::ComputerVision => "Computer Vision",
            Self::MultiModal => "Multi-modal",
            Self::GenerativeAi => "Generative AI",
            Self::ReinforcementLearning => "Reinforcement Learning",
            Self::Other => "Other",
        }
    }

    /// What: Resolve a label or alias to a [`Category`].
    ///
    /// Inputs:
    /// - `s`: Label in any case; spaces, `-` and `_` are ignored.
    ///
    /// Output:
    /// - `Some(Category)` when recognized; `None` otherwise.
    ///
    /// Details:
    /// - Feed loading maps `None` to [`Category::Other`]; criteria construction rejects it.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        match label_key(s).as_str() {
            "nlp" | "naturallanguageprocessing" | "language" => Some(Self::Nlp),
            "computervision" | "cv" | "vision" => Some(Self::ComputerVision),
            "multimodal" => Some(Self::MultiModal),
            "generativeai" | "generative" | "genai" => Some(Self::GenerativeAi),
            "reinforcementlearning" | "rl" => Some(Self::ReinforcementLearning),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl FromStr for Category {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| LabelError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The single popularity metric an entry carries, tied to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Repository stars (code hosting).
    Stars(u64),
    /// Download count (model hub).
    Downloads(u64),
    /// Citation count (preprints).
    Citations(u64),
}

impl Metric {
    /// Raw metric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        match self {
            Self::Stars(n) | Self::Downloads(n) | Self::Citations(n) => n,
        }
    }

    /// Unit noun used in listings.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Stars(_) => "stars",
            Self::Downloads(_) => "downloads",
            Self::Citations(_) => "citations",
        }
    }
}

/// One discovered AI tool or model.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Unique, stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Where the entry was discovered.
    pub source: Source,
    /// Topic classification.
    pub category: Category,
    /// External reference.
    pub url: String,
    /// Popularity metric; `None` means no metric, not zero.
    pub metric: Option<Metric>,
    /// Discovery time; `None` when the feed value was missing or unparseable.
    pub date_added: Option<DateTime<Utc>>,
    /// Author or organization.
    pub author: String,
    /// Tags in feed order.
    pub tags: Vec<String>,
}

impl CatalogEntry {
    /// Derived popularity: the metric value, or 0 when the entry has none.
    #[must_use]
    pub fn popularity(&self) -> u64 {
        self.metric.map_or(0, Metric::value)
    }

    /// Discovery time in Unix epoch milliseconds.
    #[must_use]
    pub fn date_added_ms(&self) -> Option<i64> {
        self.date_added.map(|d| d.timestamp_millis())
    }
}

/// Ranking strategy for the results list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Most recently discovered first.
    #[default]
    Newest,
    /// Highest popularity metric first.
    Popular,
    /// Popularity weighted by a recency factor.
    Trending,
    /// Locale-aware A-Z by name.
    Alphabetical,
}

impl SortMode {
    /// Return the string key used in settings files and on the command line.
    #[must_use]
    pub const fn as_config_key(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Popular => "popular",
            Self::Trending => "trending",
            Self::Alphabetical => "alphabetical",
        }
    }

    /// Human-readable label for listings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Popular => "Most Popular",
            Self::Trending => "Trending Now",
            Self::Alphabetical => "A-Z",
        }
    }

    /// Parse a sort mode from its settings key or legacy aliases.
    ///
    /// Inputs: `s` config string (case-insensitive).
    ///
    /// Output: `Some(SortMode)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "recent" | "date" => Some(Self::Newest),
            "popular" | "popularity" => Some(Self::Popular),
            "trending" | "mostpopular" | "most_popular" | "hot" => Some(Self::Trending),
            "alphabetical" | "a-z" | "az" | "name" => Some(Self::Alphabetical),
            _ => None,
        }
    }
}

impl FromStr for SortMode {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_config_key(s).ok_or_else(|| LabelError::UnknownSortMode(s.to_string()))
    }
}

/// "Date added" restriction applied on top of category and source filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    /// Discovered within the last 24 hours.
    Last24Hours,
    /// Discovered within the last 7 days.
    Last7Days,
    /// Discovered within the last 30 days.
    Last30Days,
    /// Discovered since January 1st (UTC) of the current year.
    ThisYear,
    /// No restriction.
    #[default]
    AllTime,
}

impl DateWindow {
    /// What: Parse a window from a short key such as `7d` or `year`.
    ///
    /// Inputs:
    /// - `s`: Window key (case-insensitive).
    ///
    /// Output:
    /// - `Some(DateWindow)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "24h" | "1d" | "day" => Some(Self::Last24Hours),
            "7d" | "week" => Some(Self::Last7Days),
            "30d" | "month" => Some(Self::Last30Days),
            "year" | "ytd" => Some(Self::ThisYear),
            "all" | "all_time" | "alltime" => Some(Self::AllTime),
            _ => None,
        }
    }

    /// What: Earliest discovery time admitted by this window.
    ///
    /// Inputs:
    /// - `now`: Reference time.
    ///
    /// Output:
    /// - `None` for [`DateWindow::AllTime`]; otherwise the inclusive lower bound.
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        use chrono::{Datelike, Duration, TimeZone};
        match self {
            Self::Last24Hours => Some(now - Duration::hours(24)),
            Self::Last7Days => Some(now - Duration::days(7)),
            Self::Last30Days => Some(now - Duration::days(30)),
            Self::ThisYear => Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0).single(),
            Self::AllTime => None,
        }
    }
}

impl FromStr for DateWindow {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_config_key(s).ok_or_else(|| LabelError::UnknownWindow(s.to_string()))
    }
}

/// Scoring formula behind [`SortMode::Trending`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrendingFormula {
    /// `popularity * dateAdded_ms / (now_ms - 30 days)`, kept for compatibility
    /// with existing dashboards.
    #[default]
    Legacy,
    /// `popularity * 0.5^(age_days / half_life_days)`.
    Decay {
        /// Age in days at which the popularity weight halves.
        half_life_days: f64,
    },
}

/// Work item sent to the query worker.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRequest {
    /// Filter and rank with the given criteria.
    Apply(crate::state::FilterCriteria),
    /// Ignore criteria and republish the full, unsorted catalog.
    Reset,
}

/// Query sent to the background query worker.
#[derive(Debug, Clone)]
pub struct QueryInput {
    /// Monotonic identifier used to drop superseded requests.
    pub id: u64,
    /// What to compute.
    pub request: QueryRequest,
    /// Reference time captured at submission (trending and date windows).
    pub now: DateTime<Utc>,
}

/// The published `(results, loading)` pair read by consumers.
#[derive(Debug, Clone)]
pub struct PipelineState {
    /// Identifier of the request whose results are shown; 0 before the first publish.
    pub query_id: u64,
    /// Ordered view over the catalog.
    pub results: Arc<[CatalogEntry]>,
    /// `true` between a submission and the publication of its results.
    pub loading: bool,
}
