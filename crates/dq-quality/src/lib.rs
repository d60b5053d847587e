//! Quality assessment for tabular datasets.
//!
//! The detector scans a dataset and produces a typed issue list, the
//! scorer turns that list into a 0-100 report, and the router
//! thresholds the score into an ABORT/CLEAN/PROCEED decision. All
//! three are pure functions of their inputs plus an explicit
//! [`QualityConfig`]; nothing here performs I/O.

pub mod checks;
mod detector;
mod route;
mod score;
pub mod stats;

pub use detector::detect;
pub use route::route;
pub use score::score;

pub use dq_model::QualityConfig;
