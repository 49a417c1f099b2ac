use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::state::{CatalogEntry, Category, Metric, Source};

/// Failure to read or decode a catalog feed.
#[derive(Debug)]
pub enum FeedError {
    /// The feed file could not be read.
    Io(std::io::Error),
    /// The feed was not a JSON array of records (or an object wrapping one).
    Json(serde_json::Error),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Json(err) => write!(f, "malformed catalog feed: {err}"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for FeedError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// One catalog record as it appears on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRecord {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free text.
    #[serde(default)]
    pub description: String,
    /// Feed source key (`github`, `huggingface`, `arxiv`, `news`).
    pub source: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// External reference.
    #[serde(default)]
    pub url: String,
    /// Repository stars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    /// Model downloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    /// Paper citations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<u64>,
    /// ISO instant of discovery.
    #[serde(default)]
    pub date_added: String,
    /// Author or organization.
    #[serde(default)]
    pub author: String,
    /// Ordered tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Accepted top-level feed shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    List(Vec<FeedRecord>),
    Wrapped {
        #[serde(alias = "entries", alias = "items")]
        tools: Vec<FeedRecord>,
    },
}

impl FeedRecord {
    /// What: Convert a wire record into a [`CatalogEntry`].
    ///
    /// Inputs:
    /// - `self`: Record decoded from the feed.
    ///
    /// Output:
    /// - `Some(CatalogEntry)`; `None` when the source is not recognized.
    ///
    /// Details:
    /// - Unknown categories become [`Category::Other`].
    /// - When several metrics are present the first of stars, downloads, citations wins.
    /// - An unparseable `dateAdded` becomes `None`.
    #[must_use]
    pub fn into_entry(self) -> Option<CatalogEntry> {
        let Some(source) = Source::from_label(&self.source) else {
            tracing::warn!(id = %self.id, source = %self.source, "[Feed] Unknown source; skipping record");
            return None;
        };
        let category = Category::from_label(&self.category).unwrap_or_else(|| {
            tracing::debug!(id = %self.id, category = %self.category, "[Feed] Unknown category mapped to Other");
            Category::Other
        });
        let populated = [self.stars, self.downloads, self.citations]
            .iter()
            .filter(|m| m.is_some())
            .count();
        if populated > 1 {
            tracing::warn!(id = %self.id, populated, "[Feed] Record carries several popularity metrics; keeping the first");
        }
        let metric = self
            .stars
            .map(Metric::Stars)
            .or(self.downloads.map(Metric::Downloads))
            .or(self.citations.map(Metric::Citations));
        let date_added = crate::util::parse_timestamp(&self.date_added);
        if date_added.is_none() && !self.date_added.trim().is_empty() {
            tracing::warn!(id = %self.id, value = %self.date_added, "[Feed] Unparseable dateAdded");
        }
        Some(CatalogEntry {
            id: self.id,
            name: self.name,
            description: self.description,
            source,
            category,
            url: self.url,
            metric,
            date_added,
            author: self.author,
            tags: self.tags,
        })
    }
}

impl From<&CatalogEntry> for FeedRecord {
    fn from(e: &CatalogEntry) -> Self {
        let (mut stars, mut downloads, mut citations) = (None, None, None);
        match e.metric {
            Some(Metric::Stars(n)) => stars = Some(n),
            Some(Metric::Downloads(n)) => downloads = Some(n),
            Some(Metric::Citations(n)) => citations = Some(n),
            None => {}
        }
        Self {
            id: e.id.clone(),
            name: e.name.clone(),
            description: e.description.clone(),
            source: e.source.as_feed_key().to_string(),
            category: e.category.label().to_string(),
            url: e.url.clone(),
            stars,
            downloads,
            citations,
            date_added: e
                .date_added
                .map(|d| d.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
                .unwrap_or_default(),
            author: e.author.clone(),
            tags: e.tags.clone(),
        }
    }
}

/// What: Decode a feed document into catalog entries.
///
/// Inputs:
/// - `json`: Feed text; a JSON array of records or an object with a `tools` array.
///
/// Output:
/// - Entries in feed order, or [`FeedError::Json`] when the document shape is wrong.
///
/// Details:
/// - Records with an unknown source are skipped.
/// - Duplicate ids keep the first occurrence.
pub fn parse_feed(json: &str) -> Result<Vec<CatalogEntry>, FeedError> {
    let records = match serde_json::from_str::<FeedDocument>(json)? {
        FeedDocument::List(r) | FeedDocument::Wrapped { tools: r } => r,
    };
    let total = records.len();
    let mut seen = HashSet::new();
    let entries: Vec<CatalogEntry> = records
        .into_iter()
        .filter_map(FeedRecord::into_entry)
        .filter(|e| {
            let fresh = seen.insert(e.id.clone());
            if !fresh {
                tracing::warn!(id = %e.id, "[Feed] Duplicate id; keeping first record");
            }
            fresh
        })
        .collect();
    tracing::debug!(total, kept = entries.len(), "[Feed] Parsed catalog feed");
    Ok(entries)
}

/// What: Read and decode a feed file.
///
/// Inputs:
/// - `path`: JSON file to read.
///
/// Output:
/// - Entries, or a [`FeedError`] describing the I/O or decoding failure.
pub fn load_feed(path: &Path) -> Result<Vec<CatalogEntry>, FeedError> {
    let text = fs::read_to_string(path)?;
    let entries = parse_feed(&text)?;
    tracing::info!(path = %path.display(), entries = entries.len(), "[Feed] Loaded catalog feed");
    Ok(entries)
}
