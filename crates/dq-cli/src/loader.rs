//! Built-in loaders for end-to-end runs.
//!
//! `CsvFileLoader` appends to a destination CSV file, treating its
//! header row as the destination schema; it supports the pipeline's
//! schema-evolution call by rewriting the file with the widened
//! header. `DiscardLoader` acknowledges rows without writing anything
//! and backs `--dry-run`.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use dq_model::{CellValue, ColumnMeta, Dataset};
use dq_pipeline::{LoadError, LoadOutcome, TableLoader};

/// Appends datasets to one destination CSV file.
pub struct CsvFileLoader {
    path: PathBuf,
}

impl CsvFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn destination_header(&self) -> Result<Option<Vec<String>>, LoadError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(csv_error)?;
        let header = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        Ok(Some(header))
    }

    fn create_with_header(&self, header: &[String]) -> Result<(), LoadError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let mut writer = csv::Writer::from_path(&self.path).map_err(csv_error)?;
        writer.write_record(header).map_err(csv_error)?;
        writer.flush().map_err(io_error)?;
        Ok(())
    }
}

impl TableLoader for CsvFileLoader {
    fn load(&mut self, dataset: &Dataset) -> Result<LoadOutcome, LoadError> {
        let header = match self.destination_header()? {
            Some(header) => header,
            None => {
                let header: Vec<String> =
                    dataset.schema().names().map(str::to_string).collect();
                self.create_with_header(&header)?;
                header
            }
        };

        // Every dataset column must already exist at the destination.
        let missing: Vec<String> = dataset
            .schema()
            .names()
            .filter(|name| !header.iter().any(|have| have.eq_ignore_ascii_case(name)))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::SchemaConflict { columns: missing });
        }

        let file = std::fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        for row in dataset.rows() {
            let record: Vec<String> = header
                .iter()
                .map(|name| {
                    dataset
                        .column_index(name)
                        .and_then(|index| row.get(index))
                        .map_or_else(String::new, CellValue::render)
                })
                .collect();
            writer.write_record(&record).map_err(csv_error)?;
        }
        writer.flush().map_err(io_error)?;

        let rows_loaded = dataset.row_count();
        info!(path = %self.path.display(), rows_loaded, "appended to destination");
        Ok(LoadOutcome { rows_loaded })
    }

    fn add_missing_columns(&mut self, columns: &[ColumnMeta]) -> Result<(), LoadError> {
        let new_names: Vec<String> = columns.iter().map(|column| column.name.clone()).collect();
        debug!(path = %self.path.display(), columns = ?new_names, "widening destination header");

        let Some(mut header) = self.destination_header()? else {
            return self.create_with_header(&new_names);
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        {
            let mut reader = csv::Reader::from_path(&self.path).map_err(csv_error)?;
            for record in reader.records() {
                let record = record.map_err(csv_error)?;
                rows.push(record.iter().map(str::to_string).collect());
            }
        }

        for name in new_names {
            if !header.iter().any(|have| have.eq_ignore_ascii_case(&name)) {
                header.push(name);
            }
        }

        let mut writer = csv::Writer::from_path(&self.path).map_err(csv_error)?;
        writer.write_record(&header).map_err(csv_error)?;
        for mut row in rows {
            row.resize(header.len(), String::new());
            writer.write_record(&row).map_err(csv_error)?;
        }
        writer.flush().map_err(io_error)?;
        Ok(())
    }
}

/// Counts rows without persisting them; used for dry runs.
#[derive(Debug, Default)]
pub struct DiscardLoader;

impl TableLoader for DiscardLoader {
    fn load(&mut self, dataset: &Dataset) -> Result<LoadOutcome, LoadError> {
        Ok(LoadOutcome {
            rows_loaded: dataset.row_count(),
        })
    }

    fn add_missing_columns(&mut self, _columns: &[ColumnMeta]) -> Result<(), LoadError> {
        Ok(())
    }
}

fn io_error(error: io::Error) -> LoadError {
    if error.kind() == io::ErrorKind::PermissionDenied {
        LoadError::Permission(error.to_string())
    } else {
        LoadError::Transient(error.to_string())
    }
}

fn csv_error(error: csv::Error) -> LoadError {
    match error.into_kind() {
        csv::ErrorKind::Io(inner) => io_error(inner),
        other => LoadError::Transient(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::{ColumnType, Schema};

    fn orders(names: &[&str], rows: Vec<Vec<CellValue>>) -> Dataset {
        let schema = Schema::new(
            names
                .iter()
                .map(|&name| ColumnMeta::new(name, ColumnType::Text))
                .collect(),
        );
        Dataset::from_rows(schema, rows).unwrap()
    }

    #[test]
    fn creates_then_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("orders.csv");
        let mut loader = CsvFileLoader::new(&path);

        let first = orders(
            &["order_id", "amount"],
            vec![vec![CellValue::text("O1"), CellValue::Number(10.0)]],
        );
        assert_eq!(loader.load(&first).unwrap().rows_loaded, 1);

        let second = orders(
            &["order_id", "amount"],
            vec![vec![CellValue::text("O2"), CellValue::Number(20.5)]],
        );
        assert_eq!(loader.load(&second).unwrap().rows_loaded, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "order_id,amount\nO1,10\nO2,20.5\n");
    }

    #[test]
    fn new_columns_conflict_until_evolved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        let mut loader = CsvFileLoader::new(&path);

        let narrow = orders(&["order_id"], vec![vec![CellValue::text("O1")]]);
        loader.load(&narrow).unwrap();

        let wide = orders(
            &["order_id", "region"],
            vec![vec![CellValue::text("O2"), CellValue::text("EU")]],
        );
        let error = loader.load(&wide).unwrap_err();
        match error {
            LoadError::SchemaConflict { columns } => {
                assert_eq!(columns, vec!["region".to_string()]);
            }
            other => panic!("expected schema conflict, got {other}"),
        }

        loader
            .add_missing_columns(&[ColumnMeta::new("region", ColumnType::Text)])
            .unwrap();
        loader.load(&wide).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "order_id,region\nO1,\nO2,EU\n");
    }

    #[test]
    fn discard_loader_counts_only() {
        let dataset = orders(&["order_id"], vec![vec![CellValue::text("O1")]]);
        let mut loader = DiscardLoader;
        assert_eq!(loader.load(&dataset).unwrap().rows_loaded, 1);
    }
}
