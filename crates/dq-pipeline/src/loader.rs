//! Loader collaborator interface.
//!
//! The destination table store sits behind this trait so the pipeline
//! can be tested against mocks and wired to any real store by the
//! caller.

use thiserror::Error;

use dq_model::{ColumnMeta, Dataset};

/// Typed load failures. `SchemaConflict` is recoverable through
/// [`TableLoader::add_missing_columns`]; `Transient` is retried under
/// the pipeline's retry policy; `Permission` fails the run at once.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("schema conflict, destination is missing columns: {}", columns.join(", "))]
    SchemaConflict { columns: Vec<String> },

    #[error("transient load failure: {0}")]
    Transient(String),

    #[error("permission denied by destination: {0}")]
    Permission(String),
}

/// Successful load acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub rows_loaded: usize,
}

/// Destination table store for cleaned datasets.
pub trait TableLoader {
    /// Load every row of the dataset, returning how many landed.
    fn load(&mut self, dataset: &Dataset) -> Result<LoadOutcome, LoadError>;

    /// Evolve the destination schema by appending the given columns.
    fn add_missing_columns(&mut self, columns: &[ColumnMeta]) -> Result<(), LoadError>;
}
