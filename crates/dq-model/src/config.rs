//! Configuration for scoring, routing, and repair behavior.
//!
//! Configuration is passed as an explicit value through every
//! component so that detection, scoring, and routing stay pure and
//! testable; nothing reads ambient global state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::issue::{IssueKind, Severity};
use crate::value::CellValue;

/// Per-kind base penalty constants.
///
/// Duplicates and bad dates weigh heaviest; nulls and outliers are
/// moderate. The exact constants are an implementation choice; the
/// hard contracts are score monotonicity and the 60/80 routing
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasePenalties {
    pub null: f64,
    pub duplicate: f64,
    pub outlier: f64,
    pub bad_date: f64,
}

impl BasePenalties {
    pub fn for_kind(&self, kind: IssueKind) -> f64 {
        match kind {
            IssueKind::Null => self.null,
            IssueKind::Duplicate => self.duplicate,
            IssueKind::Outlier => self.outlier,
            IssueKind::BadDate => self.bad_date,
        }
    }
}

impl Default for BasePenalties {
    fn default() -> Self {
        Self {
            null: 35.0,
            duplicate: 40.0,
            outlier: 20.0,
            bad_date: 40.0,
        }
    }
}

/// Severity multipliers applied on top of the base penalties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityWeights {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl SeverityWeights {
    pub fn for_severity(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        }
    }
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            low: 1.0,
            medium: 2.0,
            high: 3.0,
        }
    }
}

/// Tunable thresholds and weights for the quality engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Affected-row fraction at which an issue becomes Medium (0.10).
    pub medium_ratio: f64,
    /// Affected-row fraction at which an issue becomes High (0.30).
    pub high_ratio: f64,
    /// IQR multiple defining the acceptable numeric range (1.5).
    pub outlier_multiple: f64,
    /// Minimum numeric values required before outlier detection runs.
    pub min_numeric_values: usize,
    /// Sampled parse-success fraction that marks a column date-like.
    pub date_sample_ratio: f64,
    pub base_penalties: BasePenalties,
    pub severity_weights: SeverityWeights,
    /// Scores strictly below this route to ABORT (60).
    pub abort_below: u8,
    /// Scores up to and including this route to CLEAN (80).
    pub clean_through: u8,
    /// Designated identifier column; detected from headers when None.
    pub id_column: Option<String>,
    /// Explicit duplicate-key columns; overrides the identifier rule.
    pub key_columns: Option<Vec<String>>,
    /// Per-column null-fill overrides (column name, lowercase).
    pub fill_overrides: BTreeMap<String, CellValue>,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            medium_ratio: 0.10,
            high_ratio: 0.30,
            outlier_multiple: 1.5,
            min_numeric_values: 5,
            date_sample_ratio: 0.60,
            base_penalties: BasePenalties::default(),
            severity_weights: SeverityWeights::default(),
            abort_below: 60,
            clean_through: 80,
            id_column: None,
            key_columns: None,
            fill_overrides: BTreeMap::new(),
        }
    }
}

impl QualityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    pub fn with_key_columns(mut self, columns: Vec<String>) -> Self {
        self.key_columns = Some(columns);
        self
    }

    pub fn with_outlier_multiple(mut self, multiple: f64) -> Self {
        self.outlier_multiple = multiple;
        self
    }

    pub fn with_fill_override(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.fill_overrides
            .insert(column.into().to_lowercase(), value);
        self
    }

    /// Severity ladder shared by the fraction-based checks: Low below
    /// `medium_ratio`, Medium up to `high_ratio`, High above it.
    pub fn ratio_severity(&self, ratio: f64) -> Severity {
        if ratio > self.high_ratio {
            Severity::High
        } else if ratio >= self.medium_ratio {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn fill_override(&self, column: &str) -> Option<&CellValue> {
        self.fill_overrides.get(&column.to_lowercase())
    }
}
