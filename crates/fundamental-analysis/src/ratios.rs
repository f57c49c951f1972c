//! Per-year ratio arithmetic.
//!
//! Every ratio follows the same zero-guard policy: a denominator that is
//! not strictly positive yields `0.0` for that year (with a warning)
//! instead of failing. The provider writes `-` both for "no data" and
//! for genuine zeros, so the guard cannot tell those apart; the warning
//! is the only trace of the substitution.

use analysis_core::AnnualSeries;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Zip two (or three) series element-wise through a scalar function,
/// rounding each year to 2 decimals.
pub fn combine<F>(
    a: &AnnualSeries,
    b: &AnnualSeries,
    c: Option<&AnnualSeries>,
    f: F,
) -> AnnualSeries
where
    F: Fn(f64, f64, f64) -> f64,
{
    let mut out = [0.0f64; 4];
    for (year, slot) in out.iter_mut().enumerate() {
        let third = c.map_or(0.0, |s| s.values()[year]);
        *slot = round2(f(a.values()[year], b.values()[year], third));
    }
    AnnualSeries(out)
}

fn guard(denominator: f64, what: &'static str, numerator: impl FnOnce() -> f64) -> f64 {
    if denominator > 0.0 {
        numerator()
    } else {
        tracing::warn!(what, denominator, "non-positive denominator, substituting 0");
        0.0
    }
}

/// Money left to run the business after covering short-term debt.
pub fn working_capital(current_assets: f64, current_liabilities: f64) -> f64 {
    current_assets - current_liabilities
}

/// Pesos available per peso of short-term debt. With a non-zero
/// `inventory` this is the acid test; use it for companies that sell
/// physical product.
pub fn current_ratio(current_assets: f64, current_liabilities: f64, inventory: f64) -> f64 {
    guard(current_liabilities, "pasivo circulante", || {
        (current_assets - inventory) / current_liabilities
    })
}

/// Share of assets financed by third parties. Also used as
/// debt-to-equity by passing equity as the denominator.
pub fn debt_ratio(total_liabilities: f64, total_assets: f64) -> f64 {
    guard(total_assets, "activos totales", || {
        total_liabilities / total_assets
    })
}

/// Gross margin as a percentage of revenue.
pub fn gross_margin_pct(revenue: f64, cost_of_sales: f64) -> f64 {
    guard(revenue, "ingresos", || {
        100.0 * (revenue - cost_of_sales) / revenue
    })
}

/// Casanegra ratio: non-cash working assets over cost of sales.
pub fn casanegra_ratio(current_assets: f64, cash_and_investments: f64, cost_of_sales: f64) -> f64 {
    guard(cost_of_sales, "costo de venta", || {
        (current_assets - cash_and_investments) / cost_of_sales
    })
}

/// Equity per share outstanding (common plus preferred).
pub fn book_value_per_share(equity: f64, shares_outstanding: f64) -> f64 {
    guard(shares_outstanding, "acciones circulando", || {
        equity / shares_outstanding
    })
}

/// Fraction of earnings paid out as dividends, per share.
pub fn dps_to_eps(dividends_per_share: f64, earnings_per_share: f64) -> f64 {
    guard(earnings_per_share, "beneficio por accion", || {
        dividends_per_share / earnings_per_share
    })
}

/// Free cash flow as a percentage of equity.
pub fn fcf_to_equity_pct(free_cash_flow: f64, equity: f64) -> f64 {
    guard(equity, "patrimonio neto", || {
        100.0 * free_cash_flow / equity
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_two_series() {
        let assets = AnnualSeries([120.0, 110.0, 100.0, 90.0]);
        let liabilities = AnnualSeries([80.0, 80.0, 80.0, 80.0]);
        let wc = combine(&assets, &liabilities, None, |a, l, _| working_capital(a, l));
        assert_eq!(wc.values(), &[40.0, 30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_combine_three_series_rounds_to_two_decimals() {
        let assets = AnnualSeries([120.0, 110.0, 100.0, 90.0]);
        let liabilities = AnnualSeries([80.0, 80.0, 80.0, 80.0]);
        let inventory = AnnualSeries([20.0, 20.0, 20.0, 20.0]);
        let acid = combine(&assets, &liabilities, Some(&inventory), current_ratio);
        assert_eq!(acid.values(), &[1.25, 1.13, 1.0, 0.88]);
    }

    #[test]
    fn test_zero_guard_never_divides() {
        assert_eq!(current_ratio(100.0, 0.0, 0.0), 0.0);
        assert_eq!(current_ratio(100.0, -5.0, 0.0), 0.0);
        assert_eq!(debt_ratio(50.0, 0.0), 0.0);
        assert_eq!(gross_margin_pct(0.0, 10.0), 0.0);
        assert_eq!(casanegra_ratio(100.0, 30.0, 0.0), 0.0);
        assert_eq!(book_value_per_share(500.0, 0.0), 0.0);
        assert_eq!(dps_to_eps(1.0, 0.0), 0.0);
        assert_eq!(dps_to_eps(1.0, -2.0), 0.0);
        assert_eq!(fcf_to_equity_pct(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_zero_guard_output_is_finite() {
        for v in [
            current_ratio(1.0, 0.0, 0.0),
            debt_ratio(1.0, -1.0),
            fcf_to_equity_pct(1.0, 0.0),
        ] {
            assert!(v.is_finite());
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_gross_margin_pct() {
        assert_eq!(gross_margin_pct(200.0, 120.0), 40.0);
    }

    #[test]
    fn test_debt_ratio_as_debt_to_equity() {
        assert_eq!(debt_ratio(150.0, 100.0), 1.5);
    }
}
