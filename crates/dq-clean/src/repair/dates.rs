//! Date normalization.

use dq_model::dates::parse_any_date;
use dq_model::{CellValue, ColumnMeta, ColumnType, Dataset, Schema};

/// Rewrite text date values in the named columns as typed dates,
/// which render canonically as `YYYY-MM-DD`. Values no known format
/// can parse pass through unchanged, as do missing cells. Normalized
/// columns are retyped to `Date` in the schema.
pub fn normalize_dates(dataset: &Dataset, columns: &[String]) -> Dataset {
    let targets: Vec<usize> = columns
        .iter()
        .filter_map(|name| dataset.column_index(name))
        .collect();
    if targets.is_empty() {
        return dataset.clone();
    }

    let schema = Schema::new(
        dataset
            .schema()
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                if targets.contains(&index) {
                    ColumnMeta::new(column.name.clone(), ColumnType::Date)
                } else {
                    column.clone()
                }
            })
            .collect(),
    );

    let rows = dataset
        .rows()
        .iter()
        .map(|cells| {
            cells
                .iter()
                .enumerate()
                .map(|(index, cell)| {
                    if targets.contains(&index) {
                        normalize_cell(cell)
                    } else {
                        cell.clone()
                    }
                })
                .collect()
        })
        .collect();
    Dataset::from_rows(schema, rows).unwrap_or_else(|_| dataset.clone())
}

fn normalize_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Text(text) if !cell.is_missing() => match parse_any_date(text) {
            Some(date) => CellValue::Date(date),
            None => cell.clone(),
        },
        _ => cell.clone(),
    }
}
