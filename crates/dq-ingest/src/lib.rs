//! Table ingestion: CSV and JSON readers, column type inference, and
//! input discovery.

pub mod discovery;
pub mod error;
mod infer;
mod read;

pub use discovery::list_table_files;
pub use error::{IngestError, Result};
pub use read::{read_csv, read_csv_path, read_json, read_json_path, read_table_path};
