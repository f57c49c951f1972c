//! Least-squares trend over the four fiscal years.

use analysis_core::AnnualSeries;

use crate::ratios::round2;

/// Fiscal years on the x-axis, aligned with the series' most-recent-first
/// order. Four exact points; supporting other period counts means
/// generalizing this to the actual period labels.
pub const FISCAL_YEARS: [f64; 4] = [2022.0, 2021.0, 2020.0, 2019.0];

/// Ordinary least-squares slope of a series against [`FISCAL_YEARS`],
/// rounded to 2 decimals. Positive means the line item grows toward the
/// most recent year.
pub fn growth_slope(series: &AnnualSeries) -> f64 {
    let x_mean = FISCAL_YEARS.iter().sum::<f64>() / 4.0;
    let y_mean = series.mean();

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (x, y) in FISCAL_YEARS.iter().zip(series.iter()) {
        covariance += (x - x_mean) * (y - y_mean);
        variance += (x - x_mean) * (x - x_mean);
    }

    round2(covariance / variance)
}

/// Growing means a strictly positive slope.
pub fn is_growing(slope: f64) -> bool {
    slope > 0.0
}

/// Shrinking is the complement: zero slope counts as shrinking.
pub fn is_shrinking(slope: f64) -> bool {
    slope <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_of_perfectly_linear_series() {
        // y = 3x + b sampled at the fiscal years
        let series = AnnualSeries([
            3.0 * 2022.0 - 6000.0,
            3.0 * 2021.0 - 6000.0,
            3.0 * 2020.0 - 6000.0,
            3.0 * 2019.0 - 6000.0,
        ]);
        assert_eq!(growth_slope(&series), 3.0);
    }

    #[test]
    fn test_slope_of_constant_series_is_zero() {
        let series = AnnualSeries([7.0, 7.0, 7.0, 7.0]);
        assert_eq!(growth_slope(&series), 0.0);
    }

    #[test]
    fn test_slope_sign_for_descending_values() {
        // Values shrink toward the most recent year
        let series = AnnualSeries([10.0, 20.0, 30.0, 40.0]);
        assert!(growth_slope(&series) < 0.0);
    }

    #[test]
    fn test_slope_positive_for_recent_growth() {
        let series = AnnualSeries([120.0, 110.0, 100.0, 90.0]);
        assert!(growth_slope(&series) > 0.0);
        assert_eq!(growth_slope(&series), 10.0);
    }

    #[test]
    fn test_growth_partition_has_no_gap() {
        for slope in [-3.5, -0.01, 0.0, 0.01, 42.0] {
            assert!(is_growing(slope) != is_shrinking(slope));
        }
        assert!(is_shrinking(0.0));
        assert!(!is_growing(0.0));
    }
}
