//! Robust location and spread statistics for numeric columns.
//!
//! Quartiles use Tukey hinges (median of each half, middle element
//! excluded for odd counts). Note that a hinge can be the average of
//! two elements, so clamping an extreme value can move the hinge;
//! consumers that need clamp-stable bounds must recompute the summary
//! on the clamped sample.

/// Median, lower hinge, and upper hinge of a numeric sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
}

impl NumericSummary {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Acceptable range `[median - multiple x IQR, median + multiple x IQR]`.
    pub fn bounds(&self, multiple: f64) -> (f64, f64) {
        let spread = multiple * self.iqr();
        (self.median - spread, self.median + spread)
    }
}

/// Summarize a sample; returns `None` for an empty sample.
pub fn numeric_summary(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let median = median_of(&sorted);
    let half = sorted.len() / 2;
    let (lower, upper) = if sorted.len() % 2 == 0 {
        (&sorted[..half], &sorted[half..])
    } else {
        (&sorted[..half], &sorted[half + 1..])
    };

    Some(NumericSummary {
        median,
        q1: if lower.is_empty() {
            median
        } else {
            median_of(lower)
        },
        q3: if upper.is_empty() {
            median
        } else {
            median_of(upper)
        },
    })
}

fn median_of(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_sample() {
        let summary = numeric_summary(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q1, 1.5);
        assert_eq!(summary.q3, 4.5);
        assert_eq!(summary.iqr(), 3.0);
    }

    #[test]
    fn even_sample() {
        let summary = numeric_summary(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q1, 1.5);
        assert_eq!(summary.q3, 3.5);
    }

    #[test]
    fn unsorted_input_is_fine() {
        let summary = numeric_summary(&[5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_eq!(summary.median, 3.0);
    }

    #[test]
    fn empty_sample_is_none() {
        assert!(numeric_summary(&[]).is_none());
    }

    #[test]
    fn bounds_scale_with_multiple() {
        let summary = numeric_summary(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let (low, high) = summary.bounds(1.5);
        assert_eq!(low, 3.0 - 4.5);
        assert_eq!(high, 3.0 + 4.5);
    }
}
