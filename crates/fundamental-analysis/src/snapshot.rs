//! One ticker's fully derived financial state.
//!
//! Construction is two-phase: the caller first loads and validates every
//! raw document (see `RawDocuments`), then [`FinancialSnapshot::derive`]
//! computes each scalar field in a fixed dependency order, where every
//! field may read only fields computed before it. The snapshot is
//! write-once; nothing is recomputed or invalidated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use analysis_core::{
    cell, AnalysisError, AnalysisResult, AnnualSeries, GrowthClass, PriceToBookBand,
    RawDocuments,
};

use crate::ratios::{self, combine};
use crate::schema::{self, LineItem, RatioTable};
use crate::valuation::{self, FairValue};

/// Span text that precedes the current price on the quote page.
const QUOTE_PRICE_MARKER: &str = "Resumen";
/// Row marker that ends the dividend history table.
const DIVIDEND_TABLE_END: &str = "IBEX 35";

/// Mean-versus-threshold balance check outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub mean: f64,
    pub passed: bool,
}

/// All scraped documents and derived scalars for one ticker.
#[derive(Debug, Clone)]
pub struct FinancialSnapshot {
    symbol: String,
    horizon: u32,
    generated_at: DateTime<Utc>,
    raw: RawDocuments,
    ratio_table: RatioTable,
    // Scalars, in derivation order.
    roe: f64,
    payout_ratio: f64,
    current_price: f64,
    growth_rate: f64,
    present_eps: f64,
    average_eps: f64,
    future_eps: f64,
    future_price: f64,
    dividend_yield: f64,
    price_to_book: f64,
    per: f64,
}

impl FinancialSnapshot {
    /// Phase two: derive every scalar from validated raw documents.
    ///
    /// Fails with the name of the first field that cannot be computed.
    pub fn derive(symbol: &str, raw: RawDocuments, horizon: u32) -> AnalysisResult<Self> {
        raw.validate()?;

        let ratio_table = RatioTable::from_cells(&raw.ratios)?;

        let roe = ratio_table.roe_5y()?;
        let payout_ratio = ratio_table.payout_ttm()?.min(100.0);
        let current_price = quote_price(&raw.quote_spans)?;
        let growth_rate = valuation::growth_rate(roe, payout_ratio);

        let eps = schema::annual_series(&raw.income, LineItem::EarningsPerShare)?;
        let present_eps = eps.latest();
        let average_eps = eps.mean();
        let future_eps = valuation::future_eps(present_eps, growth_rate, horizon);
        let future_price = valuation::future_price(future_eps, growth_rate);

        let dividend_yield = average_dividend_yield(&raw.dividend_cells)?;
        let price_to_book = ratio_table.price_to_book()?;

        let per = if present_eps != 0.0 {
            current_price / present_eps
        } else {
            tracing::warn!("EPS is zero, PER substituted with 0");
            0.0
        };

        tracing::info!(
            symbol,
            roe,
            payout_ratio,
            growth_rate,
            current_price,
            "snapshot derived"
        );

        Ok(Self {
            symbol: symbol.to_string(),
            horizon,
            generated_at: Utc::now(),
            raw,
            ratio_table,
            roe,
            payout_ratio,
            current_price,
            growth_rate,
            present_eps,
            average_eps,
            future_eps,
            future_price,
            dividend_yield,
            price_to_book,
            per,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    // ----- line-item series -------------------------------------------------

    pub fn current_assets(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.balance, LineItem::CurrentAssets)
    }

    pub fn current_liabilities(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.balance, LineItem::CurrentLiabilities)
    }

    pub fn inventory(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.balance, LineItem::Inventory)
    }

    pub fn cash_and_investments(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.balance, LineItem::CashAndInvestments)
    }

    pub fn total_assets(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.balance, LineItem::TotalAssets)
    }

    pub fn total_liabilities(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.balance, LineItem::TotalLiabilities)
    }

    pub fn equity(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.balance, LineItem::TotalEquity)
    }

    /// Common plus preferred shares outstanding, per year.
    pub fn shares_outstanding(&self) -> AnalysisResult<AnnualSeries> {
        let common = schema::annual_series(&self.raw.balance, LineItem::CommonShares)?;
        let preferred = schema::annual_series(&self.raw.balance, LineItem::PreferredShares)?;
        Ok(combine(&common, &preferred, None, |c, p, _| c + p))
    }

    pub fn revenue(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.income, LineItem::Revenue)
    }

    pub fn gross_profit(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.income, LineItem::GrossProfit)
    }

    pub fn cost_of_sales(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.income, LineItem::CostOfSales)
    }

    pub fn operating_result(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.income, LineItem::OperatingResult)
    }

    pub fn net_income(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.income, LineItem::NetIncome)
    }

    pub fn eps(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.income, LineItem::EarningsPerShare)
    }

    pub fn dividends_per_share(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.income, LineItem::DividendsPerShare)
    }

    pub fn free_cash_flow(&self) -> AnalysisResult<AnnualSeries> {
        schema::annual_series(&self.raw.cash_flow, LineItem::FreeCashFlow)
    }

    // ----- per-year ratio series --------------------------------------------

    pub fn working_capital_series(&self) -> AnalysisResult<AnnualSeries> {
        Ok(combine(
            &self.current_assets()?,
            &self.current_liabilities()?,
            None,
            |a, l, _| ratios::working_capital(a, l),
        ))
    }

    pub fn current_ratio_series(&self) -> AnalysisResult<AnnualSeries> {
        Ok(combine(
            &self.current_assets()?,
            &self.current_liabilities()?,
            None,
            |a, l, _| ratios::current_ratio(a, l, 0.0),
        ))
    }

    pub fn acid_test_series(&self) -> AnalysisResult<AnnualSeries> {
        Ok(combine(
            &self.current_assets()?,
            &self.current_liabilities()?,
            Some(&self.inventory()?),
            ratios::current_ratio,
        ))
    }

    pub fn debt_ratio_series(&self) -> AnalysisResult<AnnualSeries> {
        Ok(combine(
            &self.total_liabilities()?,
            &self.total_assets()?,
            None,
            |l, a, _| ratios::debt_ratio(l, a),
        ))
    }

    pub fn debt_to_equity_series(&self) -> AnalysisResult<AnnualSeries> {
        Ok(combine(
            &self.total_liabilities()?,
            &self.equity()?,
            None,
            |l, e, _| ratios::debt_ratio(l, e),
        ))
    }

    /// Gross margin % recomputed from revenue and cost of sales, as
    /// opposed to the provider's own gross-profit row.
    pub fn computed_gross_margin_series(&self) -> AnalysisResult<AnnualSeries> {
        Ok(combine(
            &self.revenue()?,
            &self.cost_of_sales()?,
            None,
            |r, c, _| ratios::gross_margin_pct(r, c),
        ))
    }

    pub fn casanegra_series(&self) -> AnalysisResult<AnnualSeries> {
        Ok(combine(
            &self.current_assets()?,
            &self.cash_and_investments()?,
            Some(&self.cost_of_sales()?),
            ratios::casanegra_ratio,
        ))
    }

    pub fn book_value_series(&self) -> AnalysisResult<AnnualSeries> {
        Ok(combine(
            &self.equity()?,
            &self.shares_outstanding()?,
            None,
            |e, s, _| ratios::book_value_per_share(e, s),
        ))
    }

    pub fn dps_to_eps_series(&self) -> AnalysisResult<AnnualSeries> {
        Ok(combine(
            &self.dividends_per_share()?,
            &self.eps()?,
            None,
            |d, e, _| ratios::dps_to_eps(d, e),
        ))
    }

    pub fn fcf_to_equity_series(&self) -> AnalysisResult<AnnualSeries> {
        Ok(combine(
            &self.free_cash_flow()?,
            &self.equity()?,
            None,
            |f, e, _| ratios::fcf_to_equity_pct(f, e),
        ))
    }

    // ----- balance health checks --------------------------------------------

    /// Working capital mean must be positive.
    pub fn check_working_capital(&self) -> AnalysisResult<Check> {
        let mean = self.working_capital_series()?.mean();
        Ok(Check {
            mean,
            passed: mean > 0.0,
        })
    }

    /// Current ratio mean must reach 1.
    pub fn check_current_ratio(&self) -> AnalysisResult<Check> {
        let mean = self.current_ratio_series()?.mean();
        Ok(Check {
            mean,
            passed: mean >= 1.0,
        })
    }

    /// Acid test mean must reach 1.
    pub fn check_acid_test(&self) -> AnalysisResult<Check> {
        let mean = self.acid_test_series()?.mean();
        Ok(Check {
            mean,
            passed: mean >= 1.0,
        })
    }

    /// No more than half of the assets financed by third parties.
    pub fn check_debt_ratio(&self) -> AnalysisResult<Check> {
        let mean = self.debt_ratio_series()?.mean();
        Ok(Check {
            mean,
            passed: mean <= 0.5,
        })
    }

    // ----- derived scalars --------------------------------------------------

    /// 5-year average return on equity, as scraped.
    pub fn roe(&self) -> f64 {
        self.roe
    }

    /// Trailing payout ratio, capped at 100%.
    pub fn payout_ratio(&self) -> f64 {
        self.payout_ratio
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    /// Sustainable growth estimate `g`.
    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    pub fn present_eps(&self) -> f64 {
        self.present_eps
    }

    pub fn average_eps(&self) -> f64 {
        self.average_eps
    }

    pub fn future_eps(&self) -> f64 {
        self.future_eps
    }

    pub fn future_price(&self) -> f64 {
        self.future_price
    }

    /// Average of the recent dividend-yield history.
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    pub fn price_to_book(&self) -> f64 {
        self.price_to_book
    }

    pub fn per(&self) -> f64 {
        self.per
    }

    // ----- valuation views --------------------------------------------------

    pub fn growth_class(&self) -> GrowthClass {
        valuation::growth_class(self.growth_rate)
    }

    pub fn price_to_book_band(&self) -> PriceToBookBand {
        PriceToBookBand::from_ratio(self.price_to_book)
    }

    pub fn adjusted_roe(&self) -> f64 {
        valuation::adjusted_roe(self.roe, self.price_to_book)
    }

    pub fn earnings_yield(&self) -> f64 {
        valuation::earnings_yield(self.average_eps, self.current_price)
    }

    pub fn peg(&self) -> Option<f64> {
        valuation::peg(self.per, self.growth_rate)
    }

    /// 5-year average dividend yield from the ratios page (distinct from
    /// the dividend-history average used in the return estimate).
    pub fn dividend_yield_5y(&self) -> AnalysisResult<f64> {
        self.ratio_table.dividend_yield_5y()
    }

    pub fn dividend_growth_rate(&self) -> AnalysisResult<f64> {
        self.ratio_table.dividend_growth()
    }

    pub fn implied_annual_return(&self, dividend_tax: f64) -> f64 {
        valuation::implied_annual_return(
            self.future_price,
            self.current_price,
            self.horizon,
            self.dividend_yield,
            dividend_tax,
        )
    }

    pub fn fair_value(&self, safety_margin_pct: f64) -> Option<FairValue> {
        valuation::fair_value(
            self.future_price,
            self.growth_rate,
            self.horizon,
            safety_margin_pct,
            self.current_price,
        )
    }
}

/// Current price from the quote page: the span right after the last
/// span that is exactly the "Resumen" marker. Exact equality matters:
/// quote pages carry later sections like "Resumen técnico" whose
/// neighboring span is a rating, not a price.
fn quote_price(spans: &[String]) -> AnalysisResult<f64> {
    let marker = spans
        .iter()
        .rposition(|text| text == QUOTE_PRICE_MARKER)
        .ok_or(AnalysisError::MissingField {
            field: "precio actual",
        })?;
    let text = spans.get(marker + 1).ok_or(AnalysisError::MissingField {
        field: "precio actual",
    })?;
    cell::convert(text, "precio actual")
}

/// Average of the dividend-yield cells in the history table: every cell
/// holding a percentage (or the no-data dash) up to the index row that
/// ends the table.
fn average_dividend_yield(cells: &[String]) -> AnalysisResult<f64> {
    let mut yields = Vec::new();
    for text in cells {
        if text.contains(DIVIDEND_TABLE_END) {
            break;
        }
        if text.contains('%') || text.contains('-') {
            yields.push(cell::convert(text, "tasa de dividendos")?);
        }
    }

    if yields.is_empty() {
        return Err(AnalysisError::MissingField {
            field: "tasa de dividendos",
        });
    }

    Ok(yields.iter().sum::<f64>() / yields.len() as f64)
}
