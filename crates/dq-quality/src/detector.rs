use std::cmp::Ordering;

use tracing::debug;

use dq_model::{Dataset, Issue, QualityConfig};

use crate::checks;

/// Run every check and return the issue list in its observable order:
/// severity descending, then first affected row ascending.
pub fn detect(dataset: &Dataset, config: &QualityConfig) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1. Missing values, per column
    issues.extend(checks::nulls::check(dataset, config));

    // 2. Duplicate rows on the duplicate key
    issues.extend(checks::duplicates::check(dataset, config));

    // 3. Numeric outliers beyond the IQR bounds
    issues.extend(checks::outliers::check(dataset, config));

    // 4. Malformed values in date-like columns
    issues.extend(checks::dates::check(dataset, config));

    issues.sort_by(issue_order);
    debug!(
        issues = issues.len(),
        rows = dataset.row_count(),
        "detection complete"
    );
    issues
}

fn issue_order(a: &Issue, b: &Issue) -> Ordering {
    b.severity
        .cmp(&a.severity)
        .then_with(|| first_row_key(a).cmp(&first_row_key(b)))
}

fn first_row_key(issue: &Issue) -> usize {
    issue.first_row().unwrap_or(usize::MAX)
}
