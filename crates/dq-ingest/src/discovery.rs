//! Input file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

const TABLE_EXTENSIONS: &[&str] = &["csv", "json"];

/// Lists the table files (CSV or JSON) in a directory, sorted by
/// filename so batch runs are deterministic.
pub fn list_table_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_table = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                TABLE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if is_table {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
