//! Duplicate row detection.
//!
//! Rows are duplicates when they agree on the duplicate key: the
//! configured key columns, else the designated identifier column,
//! else the full row. Within each duplicate group the best row (the
//! one with the fewest missing cells, ties broken by earliest index)
//! survives; all others are flagged.

use std::collections::BTreeMap;

use dq_model::{Dataset, Issue, IssueKind, QualityConfig};

/// Resolve the duplicate-key column indexes for a dataset.
pub fn key_column_indexes(dataset: &Dataset, config: &QualityConfig) -> Vec<usize> {
    if let Some(keys) = &config.key_columns {
        return keys
            .iter()
            .filter_map(|name| dataset.column_index(name))
            .collect();
    }
    if let Some(index) = identifier_column(dataset, config) {
        return vec![index];
    }
    (0..dataset.column_count()).collect()
}

/// The designated identifier column: configured name first, then a
/// header named `id` or ending in `_id`.
pub fn identifier_column(dataset: &Dataset, config: &QualityConfig) -> Option<usize> {
    if let Some(name) = &config.id_column {
        return dataset.column_index(name);
    }
    dataset.schema().columns().iter().position(|column| {
        let lower = column.name.to_lowercase();
        lower == "id" || lower.ends_with("_id")
    })
}

/// Group row indexes sharing a duplicate key, keeping only groups
/// with more than one member. Rows whose key renders entirely blank
/// are never grouped. Groups are ordered by first occurrence.
pub fn duplicate_groups(dataset: &Dataset, keys: &[usize]) -> Vec<Vec<usize>> {
    if keys.is_empty() {
        return Vec::new();
    }
    let mut by_key: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut order: Vec<String> = Vec::new();
    for (row, cells) in dataset.rows().iter().enumerate() {
        let mut composite = String::new();
        for (position, &key) in keys.iter().enumerate() {
            if position > 0 {
                composite.push('|');
            }
            composite.push_str(cells[key].render().trim());
        }
        if composite.trim_matches('|').trim().is_empty() {
            continue;
        }
        let group = by_key.entry(composite.clone()).or_default();
        if group.is_empty() {
            order.push(composite);
        }
        group.push(row);
    }
    order
        .into_iter()
        .filter_map(|key| {
            let group = by_key.remove(&key)?;
            (group.len() > 1).then_some(group)
        })
        .collect()
}

/// The data-preserving survivor of a duplicate group: fewest missing
/// cells, ties broken by earliest row index.
pub fn best_row(dataset: &Dataset, group: &[usize]) -> usize {
    group
        .iter()
        .copied()
        .min_by_key(|&row| {
            let missing = dataset
                .row(row)
                .map_or(usize::MAX, |cells| {
                    cells.iter().filter(|cell| cell.is_missing()).count()
                });
            (missing, row)
        })
        .unwrap_or(0)
}

/// Flag every non-surviving member of each duplicate group.
pub fn check(dataset: &Dataset, config: &QualityConfig) -> Vec<Issue> {
    let total = dataset.row_count();
    if total == 0 {
        return Vec::new();
    }
    let keys = key_column_indexes(dataset, config);
    let groups = duplicate_groups(dataset, &keys);
    if groups.is_empty() {
        return Vec::new();
    }

    let mut flagged = std::collections::BTreeSet::new();
    for group in &groups {
        let keep = best_row(dataset, group);
        flagged.extend(group.iter().copied().filter(|&row| row != keep));
    }

    let ratio = flagged.len() as f64 / total as f64;
    let column = if keys.len() == 1 {
        dataset
            .schema()
            .get(keys[0])
            .map(|column| column.name.clone())
    } else {
        None
    };
    vec![Issue {
        kind: IssueKind::Duplicate,
        column,
        rows: flagged,
        severity: config.ratio_severity(ratio),
    }]
}
