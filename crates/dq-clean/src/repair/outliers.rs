//! Outlier capping.

use dq_model::{CellValue, Dataset};
use dq_quality::stats::numeric_summary;

/// Clamp numeric values in the named columns to
/// `median +/- multiple x IQR`. The bounds are taken at a fixpoint of
/// the column's own robust statistics, so clamped data reproduces the
/// same bounds and a repeated run changes nothing.
pub fn cap_outliers(dataset: &Dataset, columns: &[String], multiple: f64) -> Dataset {
    let mut result = dataset.clone();
    for name in columns {
        let Some(index) = result.column_index(name) else {
            continue;
        };
        result = cap_column(&result, index, multiple);
    }
    result
}

fn cap_column(dataset: &Dataset, index: usize, multiple: f64) -> Dataset {
    let numbers: Vec<f64> = dataset
        .column_values(index)
        .filter_map(CellValue::as_number)
        .collect();
    let Some((low, high)) = stable_bounds(&numbers, multiple) else {
        return dataset.clone();
    };

    let rows = dataset
        .rows()
        .iter()
        .map(|cells| {
            cells
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    if column != index {
                        return cell.clone();
                    }
                    match cell.as_number() {
                        Some(value) if value > high => CellValue::Number(high),
                        Some(value) if value < low => CellValue::Number(low),
                        _ => cell.clone(),
                    }
                })
                .collect()
        })
        .collect();
    Dataset::from_rows(dataset.schema().clone(), rows)
        .unwrap_or_else(|_| dataset.clone())
}

/// Bounds that survive their own clamping. A clamped value can feed a
/// hinge average, which tightens the bounds on the next computation,
/// so the summary is recomputed on the clamped sample until every
/// value sits in range. Each pass moves at least one value strictly
/// toward the median, so the loop terminates. When clamping collapses
/// the spread, the last usable bounds are kept; a rerun then sees the
/// collapsed spread up front and leaves the column alone.
fn stable_bounds(numbers: &[f64], multiple: f64) -> Option<(f64, f64)> {
    let mut values = numbers.to_vec();
    let mut bounds = None;
    loop {
        let summary = numeric_summary(&values)?;
        if multiple * summary.iqr() <= f64::EPSILON {
            return bounds;
        }
        let (low, high) = summary.bounds(multiple);
        let mut changed = false;
        for value in &mut values {
            if *value > high {
                *value = high;
                changed = true;
            } else if *value < low {
                *value = low;
                changed = true;
            }
        }
        bounds = Some((low, high));
        if !changed {
            return bounds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::{ColumnMeta, ColumnType, Schema};

    fn amounts(values: &[CellValue]) -> Dataset {
        let schema = Schema::new(vec![ColumnMeta::new("amount", ColumnType::Number)]);
        let rows = values.iter().map(|value| vec![value.clone()]).collect();
        Dataset::from_rows(schema, rows).unwrap()
    }

    #[test]
    fn extreme_value_is_clamped_to_the_upper_bound() {
        let dataset = amounts(&[
            CellValue::Number(450.0),
            CellValue::Number(480.0),
            CellValue::Number(500.0),
            CellValue::Number(520.0),
            CellValue::Number(550.0),
            CellValue::Number(600.0),
            CellValue::Number(95000.0),
        ]);
        let capped = cap_outliers(&dataset, &["amount".to_string()], 1.5);
        let top = capped.cell(6, 0).unwrap().as_number().unwrap();
        assert!(top < 95000.0);
        // median 520, hinges 480/600, spread 1.5 * 120.
        assert_eq!(top, 520.0 + 1.5 * 120.0);
        // Inliers are untouched.
        assert_eq!(capped.cell(0, 0), Some(&CellValue::Number(450.0)));
    }

    #[test]
    fn is_idempotent() {
        let dataset = amounts(&[
            CellValue::Number(10.0),
            CellValue::Number(12.0),
            CellValue::Number(11.0),
            CellValue::Number(13.0),
            CellValue::Number(9.0),
            CellValue::Number(500.0),
        ]);
        let columns = vec!["amount".to_string()];
        let once = cap_outliers(&dataset, &columns, 1.5);
        let twice = cap_outliers(&once, &columns, 1.5);
        assert_eq!(once, twice);
    }

    #[test]
    fn is_idempotent_when_a_capped_value_feeds_a_hinge() {
        // With five values the upper hinge averages the top two, so a
        // single clamp of the extreme moves the hinge and a naive
        // recomputation would tighten the bounds and clamp again. The
        // fixpoint bounds settle where the clamped value equals the
        // upper bound computed from itself, here 32.
        let dataset = amounts(&[
            CellValue::Number(2.0),
            CellValue::Number(4.0),
            CellValue::Number(5.0),
            CellValue::Number(10.0),
            CellValue::Number(1000.0),
        ]);
        let columns = vec!["amount".to_string()];
        let once = cap_outliers(&dataset, &columns, 1.5);
        let twice = cap_outliers(&once, &columns, 1.5);
        assert_eq!(once, twice);
        let top = once.cell(4, 0).unwrap().as_number().unwrap();
        assert!((top - 32.0).abs() < 1e-6);
    }

    #[test]
    fn collapsed_spread_keeps_the_last_usable_bounds() {
        // Clamping drives the extreme toward the other values until
        // the spread dies out; the column still ends up capped and a
        // second run leaves it alone.
        let dataset = amounts(&[
            CellValue::Number(1.0),
            CellValue::Number(1.0),
            CellValue::Number(1.0),
            CellValue::Number(1.0),
            CellValue::Number(100.0),
        ]);
        let columns = vec!["amount".to_string()];
        let once = cap_outliers(&dataset, &columns, 1.5);
        let twice = cap_outliers(&once, &columns, 1.5);
        assert_eq!(once, twice);
        let top = once.cell(4, 0).unwrap().as_number().unwrap();
        assert!(top < 100.0);
    }

    #[test]
    fn numeric_text_is_capped_too() {
        let dataset = amounts(&[
            CellValue::Number(10.0),
            CellValue::Number(12.0),
            CellValue::Number(11.0),
            CellValue::Number(13.0),
            CellValue::Number(9.0),
            CellValue::text("500"),
        ]);
        let capped = cap_outliers(&dataset, &["amount".to_string()], 1.5);
        assert!(matches!(capped.cell(5, 0), Some(CellValue::Number(_))));
    }

    #[test]
    fn missing_and_constant_columns_pass_through() {
        let dataset = amounts(&[
            CellValue::Number(5.0),
            CellValue::Number(5.0),
            CellValue::Number(5.0),
            CellValue::Missing,
        ]);
        assert_eq!(
            cap_outliers(&dataset, &["amount".to_string()], 1.5),
            dataset
        );
        assert_eq!(cap_outliers(&dataset, &["absent".to_string()], 1.5), dataset);
    }
}
