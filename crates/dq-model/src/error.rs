use thiserror::Error;

#[derive(Debug, Error)]
pub enum DqError {
    #[error("dataset has no rows")]
    EmptyDataset,
    #[error("dataset has no columns")]
    EmptySchema,
    #[error("row has {found} cells but the schema has {expected} columns")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DqError>;
