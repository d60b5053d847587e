use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single typed cell in a dataset.
///
/// The closed value set (text, number, date, missing) is carried
/// explicitly per cell; there is no dynamic dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Missing means an explicit null or a blank text value.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the cell, parsing numeric-looking text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Canonical string rendering: dates as `YYYY-MM-DD`, numbers
    /// without trailing zeros, missing as the empty string.
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => format_numeric(*value),
            CellValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            CellValue::Missing => String::new(),
        }
    }
}

/// Formats a floating-point number without unnecessary trailing zeros.
pub fn format_numeric(value: f64) -> String {
    let rendered = format!("{value}");
    if rendered.contains('.') {
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        rendered
    }
}
