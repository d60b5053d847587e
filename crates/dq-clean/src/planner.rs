use std::collections::BTreeSet;

use dq_model::{CleaningPlan, Issue, IssueKind, RepairOp, RepairStep};

/// Ops considered for a plan, already in execution order.
const OP_ORDER: &[RepairOp] = &[
    RepairOp::Deduplicate,
    RepairOp::NormalizeDates,
    RepairOp::CapOutliers,
    RepairOp::FillNulls,
];

/// Build the repair plan for an issue set.
///
/// A step is included iff at least one issue of its kind is present;
/// target columns are the sorted union of the matching issues'
/// columns. The step order is fixed regardless of issue order, so the
/// same issue set always yields the same plan.
pub fn plan(issues: &[Issue]) -> CleaningPlan {
    let mut steps = Vec::new();
    for &op in OP_ORDER {
        let kind = op.repairs();
        let mut present = false;
        let mut columns: BTreeSet<String> = BTreeSet::new();
        for issue in issues.iter().filter(|issue| issue.kind == kind) {
            present = true;
            if let Some(column) = &issue.column {
                columns.insert(column.clone());
            }
        }
        if present {
            steps.push(RepairStep {
                op,
                columns: columns.into_iter().collect(),
            });
        }
    }
    CleaningPlan { steps }
}
