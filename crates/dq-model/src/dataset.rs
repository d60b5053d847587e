use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DqError, Result};
use crate::value::CellValue;

/// Inferred type of a column. Date-typed columns may still hold raw
/// text cells until date normalization runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Date,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub ty: ColumnType,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Ordered column descriptor for one dataset. The column set is fixed
/// for the dataset's lifetime within a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<ColumnMeta>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnMeta>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    pub fn get(&self, index: usize) -> Option<&ColumnMeta> {
        self.columns.get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Case-insensitive column lookup.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.name.eq_ignore_ascii_case(name))
    }

    /// Compare against a prior-run schema and report added and removed
    /// column names.
    pub fn diff(&self, previous: &Schema) -> SchemaChange {
        let added = self
            .columns
            .iter()
            .filter(|column| previous.index_of(&column.name).is_none())
            .map(|column| column.name.clone())
            .collect();
        let removed = previous
            .columns
            .iter()
            .filter(|column| self.index_of(&column.name).is_none())
            .map(|column| column.name.clone())
            .collect();
        SchemaChange { added, removed }
    }
}

/// Result of comparing the current schema against a prior run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaChange {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl SchemaChange {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// An in-run tabular value: ordered typed columns and rows of cells.
///
/// Datasets are never mutated in place by quality or repair code;
/// every repair produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    schema: Schema,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(schema: Schema, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut dataset = Self::new(schema);
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.schema.len() {
            return Err(DqError::ShapeMismatch {
                expected: self.schema.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |row| row.get(column))
    }

    pub fn missing_count(&self, column: usize) -> usize {
        self.column_values(column)
            .filter(|cell| cell.is_missing())
            .count()
    }
}
