use serde::{Deserialize, Serialize};
use std::fmt;

use crate::issue::IssueKind;

/// Repair operations, applied in a fixed order: deduplication and
/// date normalization must run before outlier capping and null
/// filling so later steps see canonical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairOp {
    Deduplicate,
    NormalizeDates,
    CapOutliers,
    FillNulls,
}

impl RepairOp {
    /// Fixed execution rank; lower runs first.
    pub fn order(&self) -> u8 {
        match self {
            RepairOp::Deduplicate => 1,
            RepairOp::NormalizeDates => 2,
            RepairOp::CapOutliers => 3,
            RepairOp::FillNulls => 4,
        }
    }

    /// The issue kind this operation repairs.
    pub fn repairs(&self) -> IssueKind {
        match self {
            RepairOp::Deduplicate => IssueKind::Duplicate,
            RepairOp::NormalizeDates => IssueKind::BadDate,
            RepairOp::CapOutliers => IssueKind::Outlier,
            RepairOp::FillNulls => IssueKind::Null,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepairOp::Deduplicate => "deduplicate",
            RepairOp::NormalizeDates => "normalize_dates",
            RepairOp::CapOutliers => "cap_outliers",
            RepairOp::FillNulls => "fill_nulls",
        }
    }
}

impl fmt::Display for RepairOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One planned repair and the columns it targets. An empty column
/// list means the operation is row-level (deduplication).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairStep {
    pub op: RepairOp,
    pub columns: Vec<String>,
}

/// Ordered repair plan selected for one issue set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningPlan {
    pub steps: Vec<RepairStep>,
}

impl CleaningPlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, op: RepairOp) -> bool {
        self.steps.iter().any(|step| step.op == op)
    }
}
