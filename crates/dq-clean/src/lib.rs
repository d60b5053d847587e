//! Adaptive cleaning: plan selection and the repair library.
//!
//! The planner turns a detected issue set into an ordered
//! [`CleaningPlan`]; the repair module executes plans. Every repair
//! is a pure, idempotent `Dataset -> Dataset` function that recomputes
//! whatever it needs from the dataset it is handed; issues computed
//! against an earlier dataset version are never consulted for row
//! positions.

mod planner;
pub mod repair;

pub use planner::plan;
pub use repair::{apply, cap_outliers, deduplicate, fill_nulls, normalize_dates};
