//! Outlier detection on numeric columns.
//!
//! Uses the interquartile range as the robust spread statistic:
//! values outside `median +/- multiple x IQR` are flagged, with
//! severity proportional to how far past the boundary they sit.

use std::collections::BTreeSet;

use dq_model::{ColumnType, Dataset, Issue, IssueKind, QualityConfig, Severity};

use crate::stats::numeric_summary;

pub fn check(dataset: &Dataset, config: &QualityConfig) -> Vec<Issue> {
    let total = dataset.row_count();
    if total == 0 {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for (index, column) in dataset.schema().columns().iter().enumerate() {
        if column.ty != ColumnType::Number {
            continue;
        }
        let values: Vec<(usize, f64)> = dataset
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(row, cells)| cells[index].as_number().map(|value| (row, value)))
            .collect();
        if values.len() < config.min_numeric_values {
            continue;
        }
        let numbers: Vec<f64> = values.iter().map(|(_, value)| *value).collect();
        let Some(summary) = numeric_summary(&numbers) else {
            continue;
        };
        let spread = config.outlier_multiple * summary.iqr();
        if spread <= f64::EPSILON {
            // No usable spread; a constant column has no outliers.
            continue;
        }
        let (low, high) = summary.bounds(config.outlier_multiple);

        let mut rows = BTreeSet::new();
        let mut worst_ratio = 0.0f64;
        for (row, value) in &values {
            if *value < low || *value > high {
                rows.insert(*row);
                let distance = (value - summary.median).abs() / spread;
                worst_ratio = worst_ratio.max(distance);
            }
        }
        if rows.is_empty() {
            continue;
        }
        issues.push(Issue {
            kind: IssueKind::Outlier,
            column: Some(column.name.clone()),
            rows,
            severity: distance_severity(worst_ratio),
        });
    }
    issues
}

/// Severity from the worst distance, measured in multiples of the
/// allowed spread from the median.
fn distance_severity(ratio: f64) -> Severity {
    if ratio >= 3.0 {
        Severity::High
    } else if ratio >= 1.5 {
        Severity::Medium
    } else {
        Severity::Low
    }
}
