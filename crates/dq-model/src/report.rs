use serde::{Deserialize, Serialize};
use std::fmt;

use crate::issue::{Issue, Severity};

/// Quality assessment for one dataset: score, the ordered issue list
/// it was derived from, and the dataset shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Rule-based score in 0..=100.
    pub score: u8,
    /// Issues ordered by severity descending, then first affected row.
    pub issues: Vec<Issue>,
    pub row_count: usize,
    pub column_count: usize,
}

impl QualityReport {
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn high_count(&self) -> usize {
        self.count_severity(Severity::High)
    }

    pub fn medium_count(&self) -> usize {
        self.count_severity(Severity::Medium)
    }

    pub fn low_count(&self) -> usize {
        self.count_severity(Severity::Low)
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}

/// Outcome of thresholding the quality score. Scores of exactly 60
/// and exactly 80 both route to `Clean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoutingDecision {
    Abort,
    Clean,
    Proceed,
}

impl RoutingDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingDecision::Abort => "ABORT",
            RoutingDecision::Clean => "CLEAN",
            RoutingDecision::Proceed => "PROCEED",
        }
    }
}

impl fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
