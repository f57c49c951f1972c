//! Cell text normalization.
//!
//! The provider renders numbers in Spanish locale: `.` as thousands
//! separator, `,` as decimal separator, a trailing `%` on ratios, and a
//! lone `-` where a line item has no data.

use crate::error::{AnalysisError, AnalysisResult};

/// Sentinel the provider uses for "no data". Converts to exactly 0.0.
pub const NO_DATA: &str = "-";

/// Normalize one cell's text into a number.
///
/// `context` names what was being read and only shows up in the error.
pub fn convert(text: &str, context: &str) -> AnalysisResult<f64> {
    let trimmed = text.trim().trim_matches('%').trim();
    if trimmed == NO_DATA {
        return Ok(0.0);
    }

    let normalized: String = trimmed
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    normalized
        .parse::<f64>()
        .map_err(|_| AnalysisError::InvalidCell {
            context: context.to_string(),
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_sentinel_is_zero() {
        assert_eq!(convert("-", "test").unwrap(), 0.0);
        assert_eq!(convert(" - ", "test").unwrap(), 0.0);
    }

    #[test]
    fn test_locale_separators() {
        assert_eq!(convert("1.234,56%", "test").unwrap(), 1234.56);
        assert_eq!(convert("1.085,50", "test").unwrap(), 1085.50);
        assert_eq!(convert("3,14", "test").unwrap(), 3.14);
        assert_eq!(convert("0", "test").unwrap(), 0.0);
    }

    #[test]
    fn test_percent_and_negatives() {
        assert_eq!(convert("25,5%", "test").unwrap(), 25.5);
        assert_eq!(convert("-5,2", "test").unwrap(), -5.2);
        assert_eq!(convert("-1.234,5", "test").unwrap(), -1234.5);
    }

    #[test]
    fn test_round_trip_of_representable_values() {
        for x in [0.5, 17.25, -3.75, 1000.0] {
            let rendered = format!("{x}").replace('.', ",");
            assert_eq!(convert(&rendered, "test").unwrap(), x);
        }
    }

    #[test]
    fn test_non_numeric_is_an_error() {
        let err = convert("Activos", "activo circulante").unwrap_err();
        match err {
            AnalysisError::InvalidCell { context, text } => {
                assert_eq!(context, "activo circulante");
                assert_eq!(text, "Activos");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
