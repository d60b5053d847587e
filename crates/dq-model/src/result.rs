use serde::{Deserialize, Serialize};
use std::fmt;

use crate::report::{QualityReport, RoutingDecision};

/// Terminal status of one pipeline run.
///
/// `Rejected` is a normal outcome (quality below the abort bound),
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Success,
    Rejected,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "SUCCESS",
            RunStatus::Rejected => "REJECTED",
            RunStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated result of one run, created once and immutable after the
/// run completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub status: RunStatus,
    pub rows_in: usize,
    pub rows_out: usize,
    /// None when the run failed before routing.
    pub decision: Option<RoutingDecision>,
    pub report: Option<QualityReport>,
    pub errors: Vec<String>,
    /// Human-readable reason accompanying the terminal status.
    pub reason: String,
}

impl PipelineResult {
    pub fn score(&self) -> u8 {
        self.report.as_ref().map_or(0, |report| report.score)
    }

    pub fn summary(&self, source: impl Into<String>) -> RunSummary {
        RunSummary {
            source: source.into(),
            status: self.status,
            rows_in: self.rows_in,
            rows_out: self.rows_out,
            decision: self.decision,
            score: self.score(),
            issue_count: self.report.as_ref().map_or(0, QualityReport::issue_count),
        }
    }
}

/// Per-file summary emitted for the reporting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub source: String,
    pub status: RunStatus,
    pub rows_in: usize,
    pub rows_out: usize,
    pub decision: Option<RoutingDecision>,
    pub score: u8,
    pub issue_count: usize,
}
