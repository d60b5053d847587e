//! Null filling with type-appropriate defaults.

use dq_model::{CellValue, ColumnType, Dataset};
use dq_model::QualityConfig;

/// Fill missing cells in the named columns: `0` for numeric columns,
/// the empty string for text columns. Date columns are left missing
/// unless an explicit per-column override is configured; there is no
/// honest default date.
pub fn fill_nulls(dataset: &Dataset, columns: &[String], config: &QualityConfig) -> Dataset {
    let targets: Vec<usize> = columns
        .iter()
        .filter_map(|name| dataset.column_index(name))
        .collect();
    if targets.is_empty() {
        return dataset.clone();
    }

    let fills: Vec<Option<CellValue>> = dataset
        .schema()
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            if !targets.contains(&index) {
                return None;
            }
            if let Some(value) = config.fill_override(&column.name) {
                return Some(value.clone());
            }
            match column.ty {
                ColumnType::Number => Some(CellValue::Number(0.0)),
                ColumnType::Text => Some(CellValue::Text(String::new())),
                ColumnType::Date => None,
            }
        })
        .collect();

    let rows = dataset
        .rows()
        .iter()
        .map(|cells| {
            cells
                .iter()
                .enumerate()
                .map(|(index, cell)| match &fills[index] {
                    Some(fill) if cell.is_missing() => fill.clone(),
                    _ => cell.clone(),
                })
                .collect()
        })
        .collect();
    Dataset::from_rows(dataset.schema().clone(), rows)
        .unwrap_or_else(|_| dataset.clone())
}
