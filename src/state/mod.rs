//! Catalog model, filter criteria, and pipeline message types.

pub mod criteria;
pub mod types;

pub use criteria::{CriteriaAction, FilterCriteria};
pub use types::{
    CatalogEntry, Category, DateWindow, LabelError, Metric, PipelineState, QueryInput,
    QueryRequest, SortMode, Source, TrendingFormula,
};
