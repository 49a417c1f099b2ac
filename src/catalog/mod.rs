//! Immutable catalog store and feed loading.
//!
//! The store is filled once from an externally supplied feed (a JSON file or
//! the bundled sample) and shared read-only for the rest of the session.

use std::path::Path;
use std::sync::Arc;

use crate::state::CatalogEntry;

mod feed;

pub use feed::{FeedError, FeedRecord, load_feed, parse_feed};

/// Sample feed bundled with the binary, used when no catalog path is configured.
pub const SAMPLE_FEED: &str = include_str!("../../assets/sample_catalog.json");

/// Fully loaded, immutable set of catalog entries.
///
/// Cloning is cheap; all clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    entries: Arc<[CatalogEntry]>,
}

impl CatalogStore {
    /// Wrap already-validated entries.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// What: Load a store from a feed file.
    ///
    /// Inputs:
    /// - `path`: JSON feed path.
    ///
    /// Output:
    /// - Store on success; [`FeedError`] when the file cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self, FeedError> {
        load_feed(path).map(Self::new)
    }

    /// What: Build a store from the bundled sample feed.
    ///
    /// Output:
    /// - Store holding the sample entries; empty (with an error logged) if the
    ///   bundled document fails to decode.
    #[must_use]
    pub fn sample() -> Self {
        match parse_feed(SAMPLE_FEED) {
            Ok(entries) => Self::new(entries),
            Err(e) => {
                tracing::error!(error = %e, "[Catalog] Bundled sample feed is invalid");
                Self::default()
            }
        }
    }

    /// Entries in feed order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Shared handle to the entries, in feed order.
    #[must_use]
    pub fn shared(&self) -> Arc<[CatalogEntry]> {
        Arc::clone(&self.entries)
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
