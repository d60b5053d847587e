//! CLI library components for the data quality pipeline.

pub mod loader;
pub mod logging;
