//! End-to-end query scenarios over small hand-built catalogs and the bundled sample.

use aiscout::catalog::CatalogStore;
use aiscout::logic::run_query;
use aiscout::state::{
    CatalogEntry, Category, CriteriaAction, FilterCriteria, Metric, QueryRequest, SortMode,
    Source, TrendingFormula,
};
use chrono::{DateTime, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 6, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn entry(
    id: &str,
    category: Category,
    source: Source,
    metric: Option<Metric>,
    date: &str,
) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        source,
        category,
        url: String::new(),
        metric,
        date_added: aiscout::util::parse_timestamp(date),
        author: String::new(),
        tags: Vec::new(),
    }
}

fn names(v: &[CatalogEntry]) -> Vec<&str> {
    v.iter().map(|e| e.name.as_str()).collect()
}

fn sorted(entries: &[CatalogEntry], mode: SortMode) -> Vec<CatalogEntry> {
    let criteria = FilterCriteria::default().reduce(CriteriaAction::SetSort(mode));
    run_query(
        entries,
        &QueryRequest::Apply(criteria),
        now(),
        TrendingFormula::Legacy,
    )
}

#[test]
/// What: Heterogeneous metrics compare on one popularity scale
///
/// Inputs:
/// - A(stars=100, 2025-01-01), B(downloads=500, 2025-03-01), C(citations=10, 2025-02-01)
///
/// Output:
/// - Popular: B, A, C. Newest: B, C, A.
fn scenario_abc_popular_and_newest() {
    let entries = vec![
        entry("A", Category::Nlp, Source::CodeHost, Some(Metric::Stars(100)), "2025-01-01"),
        entry("B", Category::Nlp, Source::ModelHub, Some(Metric::Downloads(500)), "2025-03-01"),
        entry("C", Category::Nlp, Source::Preprint, Some(Metric::Citations(10)), "2025-02-01"),
    ];
    assert_eq!(names(&sorted(&entries, SortMode::Popular)), vec!["B", "A", "C"]);
    assert_eq!(names(&sorted(&entries, SortMode::Newest)), vec!["B", "C", "A"]);
}

#[test]
/// What: Category restriction keeps only matching entries
///
/// Inputs:
/// - One NLP and one Computer Vision entry; criteria `{categories: {NLP}}`
///
/// Output:
/// - Only the NLP entry.
fn scenario_single_category() {
    let entries = vec![
        entry("nlp", Category::Nlp, Source::CodeHost, None, "2025-01-01"),
        entry("cv", Category::ComputerVision, Source::CodeHost, None, "2025-01-02"),
    ];
    let criteria = FilterCriteria::default().reduce(CriteriaAction::ToggleCategory(Category::Nlp));
    let out = run_query(
        &entries,
        &QueryRequest::Apply(criteria),
        now(),
        TrendingFormula::Legacy,
    );
    assert_eq!(names(&out), vec!["nlp"]);
}

#[test]
/// What: Display-form source labels select model-hub entries from the sample
///
/// Inputs:
/// - Source labels "Hugging Face", "huggingface", "HuggingFace"
///
/// Output:
/// - The three model-hub tools every time.
fn scenario_source_label_forms_agree() {
    let store = CatalogStore::sample();
    for label in ["Hugging Face", "huggingface", "HuggingFace"] {
        let criteria = FilterCriteria::from_labels::<&str, &str>(&[], &[label])
            .expect("known label")
            .reduce(CriteriaAction::SetSort(SortMode::Alphabetical));
        let out = run_query(
            store.entries(),
            &QueryRequest::Apply(criteria),
            now(),
            TrendingFormula::Legacy,
        );
        assert_eq!(
            names(&out),
            vec!["AudioGen Pro", "DALL-E 3 Mini", "Neural3D"],
            "{label}"
        );
    }
}

#[test]
/// What: Trending over the sample follows popularity for recent entries
///
/// Inputs:
/// - Bundled sample, legacy formula
///
/// Output:
/// - Model-hub downloads lead; the metric-less news entry is last.
fn scenario_sample_trending() {
    let store = CatalogStore::sample();
    let out = sorted(store.entries(), SortMode::Trending);
    assert_eq!(
        names(&out)[..3],
        ["DALL-E 3 Mini", "AudioGen Pro", "Neural3D"]
    );
    assert_eq!(out.last().map(|e| e.name.as_str()), Some("Open Weights Roundup"));
}

#[test]
/// What: Multi-dimension filtering plus search and window
///
/// Inputs:
/// - Sample; GitHub source, NLP or Multi-modal, last 7 days, search "apple"
///
/// Output:
/// - Only SwiftFusion (author "Apple ML").
fn scenario_combined_restrictions() {
    let store = CatalogStore::sample();
    let criteria = FilterCriteria::from_labels(&["NLP", "Multi-modal"], &["GitHub"])
        .expect("known labels")
        .reduce(CriteriaAction::SetWindow(aiscout::state::DateWindow::Last7Days))
        .reduce(CriteriaAction::SetSearch("apple".to_string()));
    let out = run_query(
        store.entries(),
        &QueryRequest::Apply(criteria),
        now(),
        TrendingFormula::Legacy,
    );
    assert_eq!(names(&out), vec!["SwiftFusion"]);
}
