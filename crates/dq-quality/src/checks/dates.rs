//! Date malformation detection.
//!
//! A column is date-like when its schema type says so, its header
//! looks like a date, or a sample of its values mostly parses as
//! dates. Within date-like columns, any non-missing value that is not
//! canonical ISO `YYYY-MM-DD` is flagged; the repair step later
//! normalizes the parseable ones and passes the rest through.

use std::collections::BTreeSet;

use dq_model::dates::{is_iso_date, looks_like_date_header, parse_any_date};
use dq_model::{CellValue, ColumnType, Dataset, Issue, IssueKind, QualityConfig};

const SAMPLE_LIMIT: usize = 20;

/// True when the column should be treated as holding dates.
pub fn is_date_column(dataset: &Dataset, index: usize, config: &QualityConfig) -> bool {
    let Some(column) = dataset.schema().get(index) else {
        return false;
    };
    if column.ty == ColumnType::Date || looks_like_date_header(&column.name) {
        return true;
    }
    if column.ty == ColumnType::Number {
        return false;
    }

    // Sample parse success rate over the first non-missing values.
    let mut sampled = 0usize;
    let mut parsed = 0usize;
    for cell in dataset.column_values(index) {
        if cell.is_missing() {
            continue;
        }
        sampled += 1;
        let hit = match cell {
            CellValue::Date(_) => true,
            CellValue::Text(text) => parse_any_date(text).is_some(),
            _ => false,
        };
        if hit {
            parsed += 1;
        }
        if sampled == SAMPLE_LIMIT {
            break;
        }
    }
    sampled > 0 && parsed as f64 / sampled as f64 >= config.date_sample_ratio
}

pub fn check(dataset: &Dataset, config: &QualityConfig) -> Vec<Issue> {
    let total = dataset.row_count();
    if total == 0 {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for (index, column) in dataset.schema().columns().iter().enumerate() {
        if !is_date_column(dataset, index, config) {
            continue;
        }
        let rows: BTreeSet<usize> = dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, cells)| is_malformed(&cells[index]))
            .map(|(row, _)| row)
            .collect();
        if rows.is_empty() {
            continue;
        }
        let ratio = rows.len() as f64 / total as f64;
        issues.push(Issue {
            kind: IssueKind::BadDate,
            column: Some(column.name.clone()),
            rows,
            severity: config.ratio_severity(ratio),
        });
    }
    issues
}

fn is_malformed(cell: &CellValue) -> bool {
    match cell {
        CellValue::Date(_) | CellValue::Missing => false,
        CellValue::Text(text) => !text.trim().is_empty() && !is_iso_date(text),
        CellValue::Number(_) => true,
    }
}
