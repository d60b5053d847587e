//! Column type inference over raw text tables.
//!
//! CSV and JSON readers hand every cell over as text (or missing);
//! inference decides per column whether it is numeric, date-like, or
//! plain text. Numeric cells are converted eagerly; date cells are
//! kept as raw text so that malformed values stay visible to quality
//! detection and normalization.

use dq_model::dates::{looks_like_date_header, parse_any_date};
use dq_model::{CellValue, ColumnMeta, ColumnType, Dataset, Schema};

use crate::error::Result;

/// Fraction of non-missing values that must parse for a column to be
/// typed Number or Date.
const INFER_RATIO: f64 = 0.60;

/// Non-missing values sampled per column when probing date formats.
const DATE_SAMPLE: usize = 20;

/// Build a typed dataset from headers and raw text rows.
pub fn build_dataset(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Dataset> {
    let types: Vec<ColumnType> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| infer_column(header, &rows, index))
        .collect();

    let schema = Schema::new(
        headers
            .into_iter()
            .zip(&types)
            .map(|(name, &ty)| ColumnMeta::new(name, ty))
            .collect(),
    );

    let mut dataset = Dataset::new(schema);
    for row in rows {
        let cells = row
            .into_iter()
            .zip(&types)
            .map(|(value, &ty)| cell_for(value, ty))
            .collect();
        dataset.push_row(cells)?;
    }
    Ok(dataset)
}

fn infer_column(header: &str, rows: &[Vec<Option<String>>], index: usize) -> ColumnType {
    if looks_like_date_header(header) {
        return ColumnType::Date;
    }

    let present: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get(index).and_then(Option::as_deref))
        .collect();
    if present.is_empty() {
        return ColumnType::Text;
    }

    let numeric = present
        .iter()
        .filter(|value| value.parse::<f64>().is_ok())
        .count();
    if numeric as f64 / present.len() as f64 >= INFER_RATIO {
        return ColumnType::Number;
    }

    let sample_len = present.len().min(DATE_SAMPLE);
    let dates = present
        .iter()
        .take(sample_len)
        .filter(|value| parse_any_date(value).is_some())
        .count();
    if dates as f64 / sample_len as f64 >= INFER_RATIO {
        return ColumnType::Date;
    }

    ColumnType::Text
}

fn cell_for(value: Option<String>, ty: ColumnType) -> CellValue {
    let Some(text) = value else {
        return CellValue::Missing;
    };
    match ty {
        ColumnType::Number => match text.parse::<f64>() {
            Ok(number) => CellValue::Number(number),
            Err(_) => CellValue::Text(text),
        },
        // Date columns keep raw text until normalization runs.
        ColumnType::Date | ColumnType::Text => CellValue::Text(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: &[&str]) -> Vec<Vec<Option<String>>> {
        values
            .iter()
            .map(|&value| {
                vec![if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }]
            })
            .collect()
    }

    #[test]
    fn mostly_numeric_column_is_number() {
        let dataset =
            build_dataset(vec!["amount".into()], raw(&["10", "20.5", "n/a", "30", "40"]))
                .unwrap();
        assert_eq!(dataset.schema().get(0).unwrap().ty, ColumnType::Number);
        assert_eq!(dataset.cell(0, 0), Some(&CellValue::Number(10.0)));
        // The unparseable value survives as text.
        assert_eq!(dataset.cell(2, 0), Some(&CellValue::text("n/a")));
    }

    #[test]
    fn date_header_wins_without_sampling() {
        let dataset = build_dataset(vec!["order_date".into()], raw(&["garbage"])).unwrap();
        assert_eq!(dataset.schema().get(0).unwrap().ty, ColumnType::Date);
        assert_eq!(dataset.cell(0, 0), Some(&CellValue::text("garbage")));
    }

    #[test]
    fn date_values_are_sampled_when_header_is_opaque() {
        let dataset = build_dataset(
            vec!["when".into()],
            raw(&["2025-01-01", "2025-01-02", "15/02/2025", "oops"]),
        )
        .unwrap();
        assert_eq!(dataset.schema().get(0).unwrap().ty, ColumnType::Date);
    }

    #[test]
    fn mixed_column_falls_back_to_text() {
        let dataset =
            build_dataset(vec!["note".into()], raw(&["alpha", "beta", "3", "gamma"])).unwrap();
        assert_eq!(dataset.schema().get(0).unwrap().ty, ColumnType::Text);
    }

    #[test]
    fn missing_cells_stay_missing() {
        let dataset = build_dataset(vec!["amount".into()], raw(&["1", "", "3"])).unwrap();
        assert_eq!(dataset.cell(1, 0), Some(&CellValue::Missing));
        assert_eq!(dataset.missing_count(0), 1);
    }
}
