//! CSV and JSON table readers.
//!
//! Both readers normalize to the same raw shape (trimmed text cells,
//! blanks as missing) and hand off to type inference, so a table
//! behaves identically whichever format it arrived in.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use dq_model::Dataset;

use crate::error::{IngestError, Result};
use crate::infer::build_dataset;

/// Read a CSV table with a header row.
pub fn read_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let header = if index == 0 {
                header.trim_start_matches('\u{feff}')
            } else {
                header
            };
            header.trim().to_string()
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Short records pad with missing; long records drop the tail.
        let row = (0..headers.len())
            .map(|index| record.get(index).and_then(normalize_cell))
            .collect();
        rows.push(row);
    }
    debug!(rows = rows.len(), columns = headers.len(), "read CSV table");
    build_dataset(headers, rows)
}

pub fn read_csv_path(path: &Path) -> Result<Dataset> {
    read_csv(open(path)?)
}

/// Read a JSON table: an array of flat objects. Column order follows
/// first appearance across the objects.
pub fn read_json<R: Read>(input: R) -> Result<Dataset> {
    let value: Value = serde_json::from_reader(input)?;
    let Value::Array(items) = value else {
        return Err(IngestError::JsonShape {
            found: json_kind(&value).to_string(),
        });
    };

    let mut headers: Vec<String> = Vec::new();
    for item in &items {
        let Value::Object(object) = item else {
            return Err(IngestError::JsonShape {
                found: json_kind(item).to_string(),
            });
        };
        for key in object.keys() {
            if !headers.iter().any(|header| header == key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|object| {
            headers
                .iter()
                .map(|header| object.get(header).and_then(json_cell))
                .collect()
        })
        .collect();
    debug!(rows = items.len(), columns = headers.len(), "read JSON table");
    build_dataset(headers, rows)
}

pub fn read_json_path(path: &Path) -> Result<Dataset> {
    read_json(open(path)?)
}

/// Read a table, dispatching on the file extension; files without a
/// recognized extension are sniffed by their first non-blank byte.
pub fn read_table_path(path: &Path) -> Result<Dataset> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => read_csv_path(path),
        Some("json") => read_json_path(path),
        _ => {
            let mut content = String::new();
            open(path)?
                .read_to_string(&mut content)
                .map_err(|source| IngestError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })?;
            if content.trim_start().starts_with(['[', '{']) {
                read_json(content.as_bytes())
            } else if extension.is_none() {
                read_csv(content.as_bytes())
            } else {
                Err(IngestError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        }
    }
}

fn open(path: &Path) -> Result<File> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn json_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => normalize_cell(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
