//! Feed decoding from disk.

use aiscout::catalog::{CatalogStore, FeedError, load_feed};
use aiscout::logic::rank;
use aiscout::state::{Category, SortMode, TrendingFormula};
use chrono::{TimeZone, Utc};

#[test]
/// What: Wrapped feed documents load and lenient records survive
///
/// Inputs:
/// - `{"tools": [...]}` with an unknown category, a bad date, and an unknown source
///
/// Output:
/// - Two entries; unknown category is Other; bad-date entry sorts last under newest.
fn feed_wrapped_document_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("feed.json");
    std::fs::write(
        &path,
        r#"{"tools": [
            {"id": "1", "name": "Undated", "source": "arxiv", "category": "Robotics",
             "citations": 3, "dateAdded": "sometime"},
            {"id": "2", "name": "Dated", "source": "Hugging Face", "category": "NLP",
             "downloads": 1, "dateAdded": "2025-01-01"},
            {"id": "3", "name": "Elsewhere", "source": "mastodon", "dateAdded": "2025-01-02"}
        ]}"#,
    )
    .expect("write feed");

    let store = CatalogStore::load(&path).expect("load");
    assert_eq!(store.len(), 2);
    let undated = store.get("1").expect("entry 1");
    assert_eq!(undated.category, Category::Other);
    assert!(undated.date_added.is_none());

    let now = Utc
        .with_ymd_and_hms(2025, 4, 6, 0, 0, 0)
        .single()
        .expect("valid date");
    let newest = rank(
        store.entries().to_vec(),
        SortMode::Newest,
        now,
        TrendingFormula::Legacy,
    );
    assert_eq!(newest.last().map(|e| e.id.as_str()), Some("1"));
}

#[test]
/// What: Unreadable and malformed feeds report distinct errors
///
/// Inputs:
/// - Missing path; file with a JSON object that is not a feed
///
/// Output:
/// - `FeedError::Io` and `FeedError::Json` respectively.
fn feed_errors_are_classified() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(matches!(
        load_feed(&dir.path().join("missing.json")),
        Err(FeedError::Io(_))
    ));
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"name": "not a feed"}"#).expect("write");
    let err = load_feed(&bad).expect_err("malformed");
    assert!(matches!(err, FeedError::Json(_)));
    assert!(err.to_string().contains("malformed catalog feed"));
}
