use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kinds of data quality defects the detector reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Null,
    Duplicate,
    Outlier,
    BadDate,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Null => "null",
            IssueKind::Duplicate => "duplicate",
            IssueKind::Outlier => "outlier",
            IssueKind::BadDate => "bad_date",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Issue severity, ordered Low < Medium < High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected quality defect.
///
/// Row indices are valid only against the dataset the issue was
/// detected on; an issue is stale as soon as that dataset is replaced
/// by a repaired version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub column: Option<String>,
    pub rows: BTreeSet<usize>,
    pub severity: Severity,
}

impl Issue {
    pub fn for_column(
        kind: IssueKind,
        column: impl Into<String>,
        rows: impl IntoIterator<Item = usize>,
        severity: Severity,
    ) -> Self {
        Self {
            kind,
            column: Some(column.into()),
            rows: rows.into_iter().collect(),
            severity,
        }
    }

    pub fn row_level(
        kind: IssueKind,
        rows: impl IntoIterator<Item = usize>,
        severity: Severity,
    ) -> Self {
        Self {
            kind,
            column: None,
            rows: rows.into_iter().collect(),
            severity,
        }
    }

    pub fn affected(&self) -> usize {
        self.rows.len()
    }

    pub fn first_row(&self) -> Option<usize> {
        self.rows.iter().next().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn first_row_is_smallest() {
        let issue = Issue::for_column(IssueKind::Null, "amount", [7, 2, 5], Severity::Low);
        assert_eq!(issue.first_row(), Some(2));
        assert_eq!(issue.affected(), 3);
    }
}
