//! Deduplication with data-preserving tie-breaks.

use std::collections::BTreeSet;

use dq_model::{Dataset, QualityConfig};
use dq_quality::checks::duplicates::{best_row, duplicate_groups, key_column_indexes};

/// Retain exactly one row per duplicate group: the row with the
/// fewest missing cells, ties broken by earliest index. Survivors
/// keep their original relative order. Re-running on deduplicated
/// data is a no-op.
pub fn deduplicate(dataset: &Dataset, config: &QualityConfig) -> Dataset {
    let keys = key_column_indexes(dataset, config);
    let groups = duplicate_groups(dataset, &keys);
    if groups.is_empty() {
        return dataset.clone();
    }

    let mut dropped = BTreeSet::new();
    for group in &groups {
        let keep = best_row(dataset, group);
        dropped.extend(group.iter().copied().filter(|&row| row != keep));
    }

    let rows = dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(row, _)| !dropped.contains(row))
        .map(|(_, cells)| cells.clone())
        .collect();
    Dataset::from_rows(dataset.schema().clone(), rows)
        .unwrap_or_else(|_| dataset.clone())
}
