//! Machine-readable summary of one snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use analysis_core::{AnalysisResult, GrowthClass, PriceToBookBand};
use fundamental_analysis::{Check, FairValue, FinancialSnapshot};

#[derive(Debug, Serialize)]
pub struct Summary {
    pub symbol: String,
    pub generated_at: DateTime<Utc>,
    pub horizon_years: u32,

    pub checks: Checks,

    pub roe: f64,
    pub adjusted_roe: f64,
    pub payout_ratio: f64,
    pub growth_rate: f64,
    pub growth_class: GrowthClass,
    pub present_eps: f64,
    pub average_eps: f64,
    pub future_eps: f64,
    pub future_price: f64,
    pub current_price: f64,
    pub dividend_yield: f64,
    pub implied_annual_return: f64,
    pub price_to_book: f64,
    pub price_to_book_band: PriceToBookBand,
    pub per: f64,
    pub peg: Option<f64>,
    pub earnings_yield: f64,

    pub fair_value: Option<FairValue>,
}

#[derive(Debug, Serialize)]
pub struct Checks {
    pub working_capital: Check,
    pub current_ratio: Check,
    pub acid_test: Check,
    pub debt_ratio: Check,
}

impl Summary {
    pub fn build(
        snap: &FinancialSnapshot,
        safety_margin_pct: f64,
        dividend_tax: f64,
    ) -> AnalysisResult<Self> {
        Ok(Self {
            symbol: snap.symbol().to_string(),
            generated_at: snap.generated_at(),
            horizon_years: snap.horizon(),
            checks: Checks {
                working_capital: snap.check_working_capital()?,
                current_ratio: snap.check_current_ratio()?,
                acid_test: snap.check_acid_test()?,
                debt_ratio: snap.check_debt_ratio()?,
            },
            roe: snap.roe(),
            adjusted_roe: snap.adjusted_roe(),
            payout_ratio: snap.payout_ratio(),
            growth_rate: snap.growth_rate(),
            growth_class: snap.growth_class(),
            present_eps: snap.present_eps(),
            average_eps: snap.average_eps(),
            future_eps: snap.future_eps(),
            future_price: snap.future_price(),
            current_price: snap.current_price(),
            dividend_yield: snap.dividend_yield(),
            implied_annual_return: snap.implied_annual_return(dividend_tax),
            price_to_book: snap.price_to_book(),
            price_to_book_band: snap.price_to_book_band(),
            per: snap.per(),
            peg: snap.peg(),
            earnings_yield: snap.earnings_yield(),
            fair_value: snap.fair_value(safety_margin_pct),
        })
    }
}
