//! Null/empty value detection.
//!
//! Any missing value counts; severity scales with the missing
//! fraction (Low below 10%, Medium through 30%, High above).

use std::collections::BTreeSet;

use dq_model::{Dataset, Issue, IssueKind, QualityConfig};

/// One issue per column that contains missing values.
pub fn check(dataset: &Dataset, config: &QualityConfig) -> Vec<Issue> {
    let total = dataset.row_count();
    if total == 0 {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for (index, column) in dataset.schema().columns().iter().enumerate() {
        let rows: BTreeSet<usize> = dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, cells)| cells[index].is_missing())
            .map(|(row, _)| row)
            .collect();
        if rows.is_empty() {
            continue;
        }
        let ratio = rows.len() as f64 / total as f64;
        issues.push(Issue {
            kind: IssueKind::Null,
            column: Some(column.name.clone()),
            rows,
            severity: config.ratio_severity(ratio),
        });
    }
    issues
}
