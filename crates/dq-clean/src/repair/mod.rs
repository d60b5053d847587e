//! The repair library: four idempotent `Dataset -> Dataset`
//! transformations plus a plan executor.

mod dates;
mod dedupe;
mod nulls;
mod outliers;

pub use dates::normalize_dates;
pub use dedupe::deduplicate;
pub use nulls::fill_nulls;
pub use outliers::cap_outliers;

use tracing::info;

use dq_model::{CleaningPlan, Dataset, QualityConfig, RepairOp};

/// Execute a plan in order, returning the repaired dataset and
/// human-readable descriptions of the fixes applied.
pub fn apply(dataset: &Dataset, plan: &CleaningPlan, config: &QualityConfig) -> (Dataset, Vec<String>) {
    let mut current = dataset.clone();
    let mut fixes = Vec::new();

    for step in &plan.steps {
        let before = current.clone();
        current = match step.op {
            RepairOp::Deduplicate => deduplicate(&before, config),
            RepairOp::NormalizeDates => normalize_dates(&before, &step.columns),
            RepairOp::CapOutliers => cap_outliers(&before, &step.columns, config.outlier_multiple),
            RepairOp::FillNulls => fill_nulls(&before, &step.columns, config),
        };
        if let Some(fix) = describe(step.op, &before, &current) {
            info!(op = %step.op, "{fix}");
            fixes.push(fix);
        }
    }

    (current, fixes)
}

/// Describe what one step changed, comparing the datasets before and
/// after. Returns `None` when the step was a no-op.
fn describe(op: RepairOp, before: &Dataset, after: &Dataset) -> Option<String> {
    match op {
        RepairOp::Deduplicate => {
            let removed = before.row_count() - after.row_count();
            (removed > 0).then(|| format!("removed {removed} duplicate rows, kept the most complete row of each group"))
        }
        RepairOp::NormalizeDates => {
            let changed = changed_cells(before, after);
            (changed > 0).then(|| format!("normalized {changed} date values to YYYY-MM-DD"))
        }
        RepairOp::CapOutliers => {
            let changed = changed_cells(before, after);
            (changed > 0).then(|| format!("capped {changed} outliers to the IQR boundary"))
        }
        RepairOp::FillNulls => {
            let changed = changed_cells(before, after);
            (changed > 0).then(|| format!("filled {changed} missing values with column defaults"))
        }
    }
}

fn changed_cells(before: &Dataset, after: &Dataset) -> usize {
    before
        .rows()
        .iter()
        .zip(after.rows())
        .map(|(old, new)| {
            old.iter()
                .zip(new)
                .filter(|(old_cell, new_cell)| old_cell != new_cell)
                .count()
        })
        .sum()
}
