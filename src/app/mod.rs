//! Command-line front end: loads the catalog, drives the query pipeline, and
//! prints what it publishes.

/// Plain-text and JSON rendering.
pub mod render;
/// Query execution and output.
mod runtime;

pub use runtime::{load_store, run, run_with_output};
