//! Library entry for aiscout: catalog model, filter and ranking logic, and the
//! asynchronous query pipeline, exposed for the binary and integration tests.

pub mod app;
pub mod args;
pub mod catalog;
pub mod config;
pub mod logic;
pub mod pipeline;
pub mod state;
pub mod util;
