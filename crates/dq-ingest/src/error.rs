//! Ingestion error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unsupported file extension.
    #[error("unsupported table format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to parse CSV input.
    #[error("failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to parse JSON input.
    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// JSON input was not an array of objects.
    #[error("expected a JSON array of objects, found {found}")]
    JsonShape { found: String },

    /// A parsed row did not match the table shape.
    #[error(transparent)]
    Model(#[from] dq_model::DqError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
