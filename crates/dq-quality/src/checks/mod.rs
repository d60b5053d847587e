//! Issue detection checks, one module per issue kind.
//!
//! Each check is a pure function `(dataset, config) -> Vec<Issue>`:
//! no I/O, no randomness, deterministic for a given dataset.

pub mod dates;
pub mod duplicates;
pub mod nulls;
pub mod outliers;
