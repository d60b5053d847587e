use tracing::debug;

use dq_model::{Dataset, Issue, QualityConfig, QualityReport};

/// Score a dataset against its issue list.
///
/// Starts at 100 and subtracts, per issue,
/// `base_penalty(kind) x severity_weight x (affected rows / total rows)`,
/// clamping the running score to [0, 100] after every subtraction.
/// Penalties are additive; the final value is rounded to an integer.
/// This is the reported score; an advisory oracle may produce a
/// second opinion for the logs but never overrides it.
pub fn score(dataset: &Dataset, issues: &[Issue], config: &QualityConfig) -> QualityReport {
    let total = dataset.row_count();
    let mut running = 100.0f64;
    for issue in issues {
        let fraction = if total == 0 {
            0.0
        } else {
            issue.affected() as f64 / total as f64
        };
        let penalty = config.base_penalties.for_kind(issue.kind)
            * config.severity_weights.for_severity(issue.severity)
            * fraction;
        running = (running - penalty).clamp(0.0, 100.0);
        debug!(
            kind = %issue.kind,
            severity = %issue.severity,
            penalty = format!("{penalty:.2}"),
            running = format!("{running:.2}"),
            "penalty applied"
        );
    }

    QualityReport {
        score: running.round() as u8,
        issues: issues.to_vec(),
        row_count: total,
        column_count: dataset.column_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::{CellValue, ColumnMeta, ColumnType, IssueKind, Schema, Severity};

    fn dataset(rows: usize) -> Dataset {
        let schema = Schema::new(vec![ColumnMeta::new("amount", ColumnType::Number)]);
        let rows = (0..rows).map(|_| vec![CellValue::Number(1.0)]).collect();
        Dataset::from_rows(schema, rows).unwrap()
    }

    #[test]
    fn zero_issues_scores_100() {
        let report = score(&dataset(10), &[], &QualityConfig::default());
        assert_eq!(report.score, 100);
        assert_eq!(report.row_count, 10);
        assert_eq!(report.column_count, 1);
    }

    #[test]
    fn high_null_fraction_drops_below_abort_bound() {
        // 40% nulls, High severity: 35 x 3 x 0.4 = 42 -> score 58.
        let issue = Issue::for_column(IssueKind::Null, "amount", 0..4, Severity::High);
        let report = score(&dataset(10), &[issue], &QualityConfig::default());
        assert_eq!(report.score, 58);
    }

    #[test]
    fn score_never_goes_negative() {
        let issues: Vec<Issue> = (0..10)
            .map(|_| Issue::for_column(IssueKind::Duplicate, "order_id", 0..9, Severity::High))
            .collect();
        let report = score(&dataset(10), &issues, &QualityConfig::default());
        assert_eq!(report.score, 0);
    }

    #[test]
    fn penalties_are_additive() {
        let config = QualityConfig::default();
        let null = Issue::for_column(IssueKind::Null, "amount", [0, 1], Severity::Medium);
        let dup = Issue::for_column(IssueKind::Duplicate, "order_id", [3], Severity::Low);
        // 35x2x0.2 = 14 and 40x1x0.1 = 4 -> 82.
        let report = score(&dataset(10), &[null, dup], &config);
        assert_eq!(report.score, 82);
    }

    #[test]
    fn empty_dataset_keeps_score_in_range() {
        let schema = Schema::new(vec![ColumnMeta::new("amount", ColumnType::Number)]);
        let empty = Dataset::new(schema);
        let report = score(&empty, &[], &QualityConfig::default());
        assert_eq!(report.score, 100);
    }
}
