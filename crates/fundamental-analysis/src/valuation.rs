//! Growth-rate driven valuation chain.
//!
//! Each step consumes only values produced by earlier steps: sustainable
//! growth `g`, projected EPS at the horizon, a bracketed PER multiple,
//! the projected price, and the implied annualized return. The fair
//! value back-solve discounts the projected price back to today and
//! shaves a safety margin off it.

use analysis_core::{GrowthClass, Recommendation};
use serde::{Deserialize, Serialize};

/// Sustainable growth rate estimate: `ROE × (1 − payout/100)`.
pub fn growth_rate(roe: f64, payout_ratio: f64) -> f64 {
    roe * (1.0 - payout_ratio / 100.0)
}

/// PER multiple bracketed by the growth rate. A step function: exactly
/// 10 takes the 18 bracket, exactly 15 takes the 25 bracket, by the
/// left-to-right `<` cascade.
pub fn per_multiple(g: f64) -> f64 {
    if g < 10.0 {
        // income stocks
        12.5
    } else if g < 15.0 {
        // middling growers
        18.0
    } else {
        // growth companies
        25.0
    }
}

/// Company classification by `g`. The brackets are open at 10 and 15, so
/// a `g` landing exactly on a breakpoint is `Undefined` rather than
/// silently assigned to a side.
pub fn growth_class(g: f64) -> GrowthClass {
    if g < 10.0 {
        GrowthClass::Low
    } else if g > 10.0 && g < 15.0 {
        GrowthClass::Medium
    } else if g > 15.0 {
        GrowthClass::High
    } else {
        GrowthClass::Undefined
    }
}

/// EPS compounded at `g` percent over `n` years.
pub fn future_eps(present_eps: f64, g: f64, n: u32) -> f64 {
    present_eps * (1.0 + g / 100.0).powi(n as i32)
}

/// Projected price at the horizon: compounded EPS times the PER bracket.
pub fn future_price(future_eps: f64, g: f64) -> f64 {
    future_eps * per_multiple(g)
}

/// Annualized return implied by the projected price, plus the after-tax
/// dividend yield.
pub fn implied_annual_return(
    future_price: f64,
    current_price: f64,
    n: u32,
    dividend_yield: f64,
    dividend_tax: f64,
) -> f64 {
    100.0
        * ((future_price / current_price).powf(1.0 / n as f64) - 1.0
            + (dividend_yield / 100.0) * (1.0 - dividend_tax))
}

/// PER over growth. Undefined when `g` is not strictly positive.
pub fn peg(per: f64, g: f64) -> Option<f64> {
    if g > 0.0 {
        Some(per / g)
    } else {
        None
    }
}

/// ROE deflated by the price-to-book multiple.
pub fn adjusted_roe(roe: f64, price_to_book: f64) -> f64 {
    if price_to_book > 0.0 {
        roe / price_to_book
    } else {
        tracing::warn!(price_to_book, "non-positive price-to-book, substituting 0");
        0.0
    }
}

/// Average EPS over the series as a percentage of the current price.
pub fn earnings_yield(average_eps: f64, current_price: f64) -> f64 {
    if current_price > 0.0 {
        100.0 * average_eps / current_price
    } else {
        tracing::warn!(current_price, "non-positive price, substituting 0");
        0.0
    }
}

/// Fair value estimate backed out of the projected price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairValue {
    /// Projected price discounted back to today at `g`.
    pub present_value: f64,
    /// Present value after the safety margin.
    pub adjusted_value: f64,
    pub recommendation: Recommendation,
}

/// The Casanegra fair-value back-solve. Only meaningful for growing
/// companies; `g ≤ 0` yields `None`.
pub fn fair_value(
    future_price: f64,
    g: f64,
    n: u32,
    safety_margin_pct: f64,
    current_price: f64,
) -> Option<FairValue> {
    if g <= 0.0 {
        return None;
    }

    let present_value = future_price / (1.0 + g / 100.0).powi(n as i32);
    let adjusted_value = present_value * (1.0 - safety_margin_pct / 100.0);
    let recommendation = if current_price <= adjusted_value {
        Recommendation::Buy
    } else {
        Recommendation::Wait
    };

    Some(FairValue {
        present_value,
        adjusted_value,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::round2;

    #[test]
    fn test_per_multiple_brackets() {
        assert_eq!(per_multiple(9.99), 12.5);
        assert_eq!(per_multiple(14.99), 18.0);
        assert_eq!(per_multiple(15.0), 25.0);
        assert_eq!(per_multiple(20.0), 25.0);
    }

    #[test]
    fn test_per_multiple_pinned_at_breakpoints() {
        assert_eq!(per_multiple(10.0), 18.0);
        assert_eq!(per_multiple(15.0), 25.0);
    }

    #[test]
    fn test_growth_class_brackets() {
        assert_eq!(growth_class(5.0), GrowthClass::Low);
        assert_eq!(growth_class(12.0), GrowthClass::Medium);
        assert_eq!(growth_class(20.0), GrowthClass::High);
    }

    #[test]
    fn test_growth_class_breakpoints_are_undefined() {
        assert_eq!(growth_class(10.0), GrowthClass::Undefined);
        assert_eq!(growth_class(15.0), GrowthClass::Undefined);
    }

    #[test]
    fn test_valuation_chain_determinism() {
        let g = growth_rate(20.0, 40.0);
        assert_eq!(g, 12.0);
        assert_eq!(per_multiple(g), 18.0);

        let eps = future_eps(5.0, g, 5);
        assert_eq!(round2(eps), 8.81);

        let price = future_price(eps, g);
        assert_eq!(round2(price), 158.61);
    }

    #[test]
    fn test_implied_return_without_dividends() {
        // Price doubling over 5 years: (2)^(1/5) - 1 ≈ 14.87%
        let r = implied_annual_return(200.0, 100.0, 5, 0.0, 0.0);
        assert_eq!(round2(r), 14.87);
    }

    #[test]
    fn test_implied_return_adds_after_tax_dividend_yield() {
        let untaxed = implied_annual_return(200.0, 100.0, 5, 4.0, 0.0);
        let taxed = implied_annual_return(200.0, 100.0, 5, 4.0, 0.25);
        assert_eq!(round2(untaxed - taxed), 1.0);
    }

    #[test]
    fn test_peg_undefined_for_non_positive_growth() {
        assert_eq!(peg(18.0, 12.0), Some(1.5));
        assert_eq!(peg(18.0, 0.0), None);
        assert_eq!(peg(18.0, -3.0), None);
    }

    #[test]
    fn test_fair_value_back_solve() {
        // future_price = 158.61 at g = 12 over 5 years discounts back
        // to ~90 (= future_eps rounding aside, eps * multiple / growth)
        let fv = fair_value(158.61, 12.0, 5, 30.0, 50.0).unwrap();
        assert_eq!(round2(fv.present_value), 90.0);
        assert_eq!(round2(fv.adjusted_value), 63.0);
        assert_eq!(fv.recommendation, Recommendation::Buy);

        let fv = fair_value(158.61, 12.0, 5, 30.0, 70.0).unwrap();
        assert_eq!(fv.recommendation, Recommendation::Wait);
    }

    #[test]
    fn test_fair_value_requires_growth() {
        assert!(fair_value(100.0, 0.0, 5, 30.0, 50.0).is_none());
        assert!(fair_value(100.0, -2.0, 5, 30.0, 50.0).is_none());
    }

    #[test]
    fn test_adjusted_roe_guard() {
        assert_eq!(adjusted_roe(20.0, 2.0), 10.0);
        assert_eq!(adjusted_roe(20.0, 0.0), 0.0);
    }
}
