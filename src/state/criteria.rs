//! User-editable filter criteria and its reducer.

use std::collections::BTreeSet;

use super::types::{Category, DateWindow, LabelError, SortMode, Source};

/// Category/source restriction, search term, date window, and ranking choice.
///
/// Empty sets mean "no restriction" for their dimension. The value is rebuilt
/// through [`FilterCriteria::reduce`] as the user edits controls and is only
/// ever read by the query pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Selected categories (any-of).
    pub categories: BTreeSet<Category>,
    /// Selected sources (any-of).
    pub sources: BTreeSet<Source>,
    /// Ranking strategy.
    pub sort: SortMode,
    /// Free-text term matched against name, author, and tags; blank disables it.
    pub search: String,
    /// Discovery-date restriction.
    pub window: DateWindow,
}

/// A single edit made through the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaAction {
    /// Check or uncheck a category.
    SetCategory(Category, bool),
    /// Check or uncheck a source.
    SetSource(Source, bool),
    /// Flip a category checkbox.
    ToggleCategory(Category),
    /// Flip a source checkbox.
    ToggleSource(Source),
    /// Choose a ranking strategy.
    SetSort(SortMode),
    /// Replace the search text.
    SetSearch(String),
    /// Choose a date window.
    SetWindow(DateWindow),
    /// Back to defaults (no restriction, newest first).
    Clear,
}

impl FilterCriteria {
    /// What: Apply one control edit and return the updated criteria.
    ///
    /// Inputs:
    /// - `action`: Edit to apply.
    ///
    /// Output:
    /// - New criteria value; `self` is consumed.
    #[must_use]
    pub fn reduce(mut self, action: CriteriaAction) -> Self {
        match action {
            CriteriaAction::SetCategory(c, true) => {
                self.categories.insert(c);
            }
            CriteriaAction::SetCategory(c, false) => {
                self.categories.remove(&c);
            }
            CriteriaAction::SetSource(s, true) => {
                self.sources.insert(s);
            }
            CriteriaAction::SetSource(s, false) => {
                self.sources.remove(&s);
            }
            CriteriaAction::ToggleCategory(c) => {
                if !self.categories.remove(&c) {
                    self.categories.insert(c);
                }
            }
            CriteriaAction::ToggleSource(s) => {
                if !self.sources.remove(&s) {
                    self.sources.insert(s);
                }
            }
            CriteriaAction::SetSort(mode) => self.sort = mode,
            CriteriaAction::SetSearch(text) => self.search = text,
            CriteriaAction::SetWindow(window) => self.window = window,
            CriteriaAction::Clear => return Self::default(),
        }
        self
    }

    /// What: Build criteria from raw category and source labels.
    ///
    /// Inputs:
    /// - `categories`: Category labels (display or alias form).
    /// - `sources`: Source labels (display, feed key, or alias form).
    ///
    /// Output:
    /// - Criteria with newest-first sort, or the first [`LabelError`] encountered.
    ///
    /// Details:
    /// - Unknown labels are rejected here so they never reach predicate evaluation.
    pub fn from_labels<C, S>(categories: &[C], sources: &[S]) -> Result<Self, LabelError>
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        let mut criteria = Self::default();
        for label in categories {
            let c = label.as_ref().parse::<Category>()?;
            criteria = criteria.reduce(CriteriaAction::SetCategory(c, true));
        }
        for label in sources {
            let s = label.as_ref().parse::<Source>()?;
            criteria = criteria.reduce(CriteriaAction::SetSource(s, true));
        }
        Ok(criteria)
    }

    /// Whether these criteria can exclude any entry.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.categories.is_empty()
            && self.sources.is_empty()
            && self.search.trim().is_empty()
            && self.window == DateWindow::AllTime
    }
}
