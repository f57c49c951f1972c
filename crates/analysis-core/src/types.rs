use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Ordered text content of every `<td>` (or `<span>`) node of one parsed
/// document, in source order. The meaning of each index is a contract
/// with the provider's current page layout.
pub type CellSequence = Vec<String>;

/// One ticker's registry entry: provider id and URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMeta {
    pub symbol: String,
    pub provider_id: String,
    pub slug: String,
}

/// One line item over the last four fiscal years, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualSeries(pub [f64; 4]);

impl AnnualSeries {
    pub fn values(&self) -> &[f64; 4] {
        &self.0
    }

    /// Most recent fiscal year.
    pub fn latest(&self) -> f64 {
        self.0[0]
    }

    pub fn mean(&self) -> f64 {
        self.0.iter().sum::<f64>() / 4.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl std::fmt::Display for AnnualSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Raw documents for one ticker, fetched before any field is derived.
///
/// Phase one of snapshot construction: the client fills this in, then
/// `validate` rejects empty documents before derivation starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocuments {
    /// Balance sheet `<td>` cells.
    pub balance: CellSequence,
    /// Income statement `<td>` cells.
    pub income: CellSequence,
    /// Cash-flow statement `<td>` cells.
    pub cash_flow: CellSequence,
    /// Valuation-ratios page `<td>` cells.
    pub ratios: CellSequence,
    /// Quote page `<span>` texts (current price lives here).
    pub quote_spans: CellSequence,
    /// Dividends page `<td>` cells.
    pub dividend_cells: CellSequence,
}

impl RawDocuments {
    /// Fail fast if any document came back empty; an empty cell sequence
    /// would otherwise surface later as a confusing layout mismatch.
    pub fn validate(&self) -> AnalysisResult<()> {
        for (document, cells) in [
            ("balance sheet", &self.balance),
            ("income statement", &self.income),
            ("cash-flow statement", &self.cash_flow),
            ("ratios page", &self.ratios),
            ("quote page", &self.quote_spans),
            ("dividends page", &self.dividend_cells),
        ] {
            if cells.is_empty() {
                return Err(AnalysisError::Fetch {
                    document,
                    reason: "document contains no cells".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Company classification by sustainable growth rate `g`.
///
/// `g` exactly 10 or 15 is a gap in the bracketing and is kept as its
/// own bucket rather than resolved to a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthClass {
    /// g < 10: income ("dividendera") stock.
    Low,
    /// 10 < g < 15.
    Medium,
    /// g > 15.
    High,
    /// g exactly 10 or 15.
    Undefined,
}

impl GrowthClass {
    pub fn to_label(&self) -> &'static str {
        match self {
            GrowthClass::Low => "crecimiento bajo (dividenderas)",
            GrowthClass::Medium => "crecimiento medio",
            GrowthClass::High => "crecimiento alto",
            GrowthClass::Undefined => "indefinido",
        }
    }
}

/// Price-to-book banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceToBookBand {
    /// < 1: trading below book value.
    BelowBook,
    /// 1 ≤ p/b < 6.
    Normal,
    /// ≥ 6: could correct.
    VeryHigh,
}

impl PriceToBookBand {
    pub fn from_ratio(price_to_book: f64) -> Self {
        if price_to_book < 1.0 {
            PriceToBookBand::BelowBook
        } else if price_to_book < 6.0 {
            PriceToBookBand::Normal
        } else {
            PriceToBookBand::VeryHigh
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            PriceToBookBand::BelowBook => "valor en bolsa por debajo del valor libro",
            PriceToBookBand::Normal => "normal",
            PriceToBookBand::VeryHigh => "muy alto, podria corregir precio",
        }
    }
}

/// Final call from the fair-value back-solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Wait,
}

impl Recommendation {
    pub fn to_label(&self) -> &'static str {
        match self {
            Recommendation::Buy => "comprar",
            Recommendation::Wait => "esperar",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_mean_and_latest() {
        let s = AnnualSeries([40.0, 30.0, 20.0, 10.0]);
        assert_eq!(s.mean(), 25.0);
        assert_eq!(s.latest(), 40.0);
    }

    #[test]
    fn test_price_to_book_bands() {
        assert_eq!(
            PriceToBookBand::from_ratio(0.8),
            PriceToBookBand::BelowBook
        );
        assert_eq!(PriceToBookBand::from_ratio(1.0), PriceToBookBand::Normal);
        assert_eq!(PriceToBookBand::from_ratio(5.99), PriceToBookBand::Normal);
        assert_eq!(PriceToBookBand::from_ratio(6.0), PriceToBookBand::VeryHigh);
    }

    #[test]
    fn test_validate_rejects_empty_document() {
        let mut raw = RawDocuments::default();
        raw.balance = vec!["1.0".to_string()];
        let err = raw.validate().unwrap_err();
        match err {
            AnalysisError::Fetch { document, .. } => {
                assert_eq!(document, "income statement")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
