//! Positional schema for the provider's statement pages.
//!
//! Each line item is four fixed offsets into the flat `<td>` sequence of
//! one statement document (one offset per fiscal year, most recent
//! first). The offsets are configuration, not logic: when the provider
//! changes a page layout only this table needs to move, and a stale
//! table surfaces as `LayoutMismatch` instead of silently wrong numbers.
//!
//! Schema version 1.

use analysis_core::{cell, AnalysisError, AnalysisResult, AnnualSeries, CellSequence};

/// Which statement document a line item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Balance,
    Income,
    CashFlow,
}

impl Statement {
    pub fn name(&self) -> &'static str {
        match self {
            Statement::Balance => "balance sheet",
            Statement::Income => "income statement",
            Statement::CashFlow => "cash-flow statement",
        }
    }
}

/// A named accounting line item with a fixed position in its statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItem {
    // Balance sheet
    CurrentAssets,
    CashAndInvestments,
    Inventory,
    TotalAssets,
    CurrentLiabilities,
    TotalLiabilities,
    TotalEquity,
    CommonShares,
    PreferredShares,
    // Income statement
    Revenue,
    GrossProfit,
    CostOfSales,
    OperatingResult,
    NetIncome,
    EarningsPerShare,
    DividendsPerShare,
    // Cash-flow statement
    FreeCashFlow,
}

impl LineItem {
    pub fn statement(&self) -> Statement {
        use LineItem::*;
        match self {
            CurrentAssets | CashAndInvestments | Inventory | TotalAssets
            | CurrentLiabilities | TotalLiabilities | TotalEquity | CommonShares
            | PreferredShares => Statement::Balance,
            Revenue | GrossProfit | CostOfSales | OperatingResult | NetIncome
            | EarningsPerShare | DividendsPerShare => Statement::Income,
            FreeCashFlow => Statement::CashFlow,
        }
    }

    /// Cell offsets for the four fiscal years, most recent first.
    pub fn offsets(&self) -> [usize; 4] {
        use LineItem::*;
        match self {
            CurrentAssets => [1, 2, 3, 4],
            CashAndInvestments => [7, 8, 9, 10],
            Inventory => [37, 38, 39, 40],
            TotalAssets => [52, 53, 54, 55],
            CurrentLiabilities => [103, 104, 105, 106],
            TotalLiabilities => [139, 140, 141, 142],
            TotalEquity => [175, 176, 177, 178],
            CommonShares => [231, 232, 233, 234],
            PreferredShares => [236, 237, 238, 239],
            Revenue => [1, 2, 3, 4],
            GrossProfit => [22, 23, 24, 25],
            CostOfSales => [27, 28, 29, 30],
            OperatingResult => [63, 64, 65, 66],
            NetIncome => [143, 144, 145, 146],
            EarningsPerShare => [153, 154, 155, 156],
            DividendsPerShare => [158, 159, 160, 161],
            FreeCashFlow => [127, 128, 129, 130],
        }
    }

    /// Report label, in the provider's language.
    pub fn label(&self) -> &'static str {
        use LineItem::*;
        match self {
            CurrentAssets => "activo circulante",
            CashAndInvestments => "efectivo e inversiones",
            Inventory => "inventario",
            TotalAssets => "activos totales",
            CurrentLiabilities => "pasivo circulante",
            TotalLiabilities => "pasivos totales",
            TotalEquity => "patrimonio neto",
            CommonShares => "acciones comunes",
            PreferredShares => "acciones preferentes",
            Revenue => "ingresos",
            GrossProfit => "margen bruto",
            CostOfSales => "costo de venta",
            OperatingResult => "resultado de explotacion",
            NetIncome => "resultado del ejercicio",
            EarningsPerShare => "beneficio por accion",
            DividendsPerShare => "dividendo por accion",
            FreeCashFlow => "flujo de caja libre",
        }
    }
}

/// Read one line item's four-year series out of a statement's cells.
pub fn annual_series(cells: &CellSequence, item: LineItem) -> AnalysisResult<AnnualSeries> {
    let offsets = item.offsets();
    let mut values = [0.0f64; 4];
    for (year, &offset) in offsets.iter().enumerate() {
        let text = cells.get(offset).ok_or(AnalysisError::LayoutMismatch {
            statement: item.statement().name(),
            line_item: item.label(),
            offset,
            len: cells.len(),
        })?;
        values[year] = cell::convert(text, item.label())?;
    }
    Ok(AnnualSeries(values))
}

/// Exact label of the payout-ratio row on the ratios page.
pub const PAYOUT_TTM_LABEL: &str = "Ratio Payout TTM";
/// Substring of the 5-year ROE row.
pub const ROE_5Y_LABEL: &str = "Rentabilidad sobre la inversión 5YA";
/// Exact label of the 5-year average dividend yield row.
pub const DIVIDEND_YIELD_5Y_LABEL: &str = "Promedio de Rendimiento del Dividendo en 5 Años 5YA";
/// Exact label of the annual dividend growth row.
pub const DIVIDEND_GROWTH_LABEL: &str = "Tasa de Crecimiento de los Dividendos ANN";
/// Substring of the price-to-book row.
pub const PRICE_TO_BOOK_LABEL: &str = "Precio/Valor Contable MRQ";

/// Named ratios indexed from the ratios page in a single pass.
///
/// Each value is the converted content of the cell right after its
/// label. Exact labels keep the first occurrence; substring labels keep
/// the last, matching how the provider repeats them in summary rows.
#[derive(Debug, Clone, Default)]
pub struct RatioTable {
    roe_5y: Option<f64>,
    payout_ttm: Option<f64>,
    dividend_yield_5y: Option<f64>,
    dividend_growth: Option<f64>,
    price_to_book: Option<f64>,
}

impl RatioTable {
    pub fn from_cells(cells: &CellSequence) -> AnalysisResult<Self> {
        let mut table = RatioTable::default();

        for (i, text) in cells.iter().enumerate() {
            if text == PAYOUT_TTM_LABEL && table.payout_ttm.is_none() {
                table.payout_ttm = Some(value_after(cells, i, PAYOUT_TTM_LABEL)?);
            } else if text == DIVIDEND_YIELD_5Y_LABEL && table.dividend_yield_5y.is_none() {
                table.dividend_yield_5y =
                    Some(value_after(cells, i, DIVIDEND_YIELD_5Y_LABEL)?);
            } else if text == DIVIDEND_GROWTH_LABEL && table.dividend_growth.is_none() {
                table.dividend_growth = Some(value_after(cells, i, DIVIDEND_GROWTH_LABEL)?);
            } else if text.contains(ROE_5Y_LABEL) {
                table.roe_5y = Some(value_after(cells, i, ROE_5Y_LABEL)?);
            } else if text.contains(PRICE_TO_BOOK_LABEL) {
                table.price_to_book = Some(value_after(cells, i, PRICE_TO_BOOK_LABEL)?);
            }
        }

        Ok(table)
    }

    pub fn roe_5y(&self) -> AnalysisResult<f64> {
        self.roe_5y
            .ok_or(AnalysisError::MissingRatio { label: ROE_5Y_LABEL })
    }

    pub fn payout_ttm(&self) -> AnalysisResult<f64> {
        self.payout_ttm.ok_or(AnalysisError::MissingRatio {
            label: PAYOUT_TTM_LABEL,
        })
    }

    pub fn dividend_yield_5y(&self) -> AnalysisResult<f64> {
        self.dividend_yield_5y.ok_or(AnalysisError::MissingRatio {
            label: DIVIDEND_YIELD_5Y_LABEL,
        })
    }

    pub fn dividend_growth(&self) -> AnalysisResult<f64> {
        self.dividend_growth.ok_or(AnalysisError::MissingRatio {
            label: DIVIDEND_GROWTH_LABEL,
        })
    }

    pub fn price_to_book(&self) -> AnalysisResult<f64> {
        self.price_to_book.ok_or(AnalysisError::MissingRatio {
            label: PRICE_TO_BOOK_LABEL,
        })
    }
}

fn value_after(cells: &CellSequence, label_index: usize, label: &'static str) -> AnalysisResult<f64> {
    let text = cells
        .get(label_index + 1)
        .ok_or(AnalysisError::MissingRatio { label })?;
    cell::convert(text, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse_cells(len: usize, values: &[(usize, &str)]) -> CellSequence {
        let mut cells = vec!["-".to_string(); len];
        for (i, v) in values {
            cells[*i] = (*v).to_string();
        }
        cells
    }

    #[test]
    fn test_annual_series_reads_fixed_offsets() {
        let cells = sparse_cells(
            300,
            &[(1, "120"), (2, "110"), (3, "100"), (4, "90")],
        );
        let series = annual_series(&cells, LineItem::CurrentAssets).unwrap();
        assert_eq!(series.values(), &[120.0, 110.0, 100.0, 90.0]);
    }

    #[test]
    fn test_annual_series_no_data_cells_become_zero() {
        let cells = sparse_cells(300, &[(37, "20"), (39, "20")]);
        let series = annual_series(&cells, LineItem::Inventory).unwrap();
        assert_eq!(series.values(), &[20.0, 0.0, 20.0, 0.0]);
    }

    #[test]
    fn test_annual_series_out_of_range_is_layout_mismatch() {
        let cells = sparse_cells(100, &[]);
        let err = annual_series(&cells, LineItem::TotalEquity).unwrap_err();
        match err {
            AnalysisError::LayoutMismatch {
                statement,
                line_item,
                offset,
                len,
            } => {
                assert_eq!(statement, "balance sheet");
                assert_eq!(line_item, "patrimonio neto");
                assert_eq!(offset, 175);
                assert_eq!(len, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ratio_table_indexes_labels() {
        let cells: CellSequence = vec![
            "Rentabilidad sobre la inversión 5YA".to_string(),
            "21,5%".to_string(),
            "Ratio Payout TTM".to_string(),
            "45,2".to_string(),
            "Precio/Valor Contable MRQ".to_string(),
            "2,3".to_string(),
            "Promedio de Rendimiento del Dividendo en 5 Años 5YA".to_string(),
            "4,1%".to_string(),
            "Tasa de Crecimiento de los Dividendos ANN".to_string(),
            "-".to_string(),
        ];
        let table = RatioTable::from_cells(&cells).unwrap();
        assert_eq!(table.roe_5y().unwrap(), 21.5);
        assert_eq!(table.payout_ttm().unwrap(), 45.2);
        assert_eq!(table.price_to_book().unwrap(), 2.3);
        assert_eq!(table.dividend_yield_5y().unwrap(), 4.1);
        assert_eq!(table.dividend_growth().unwrap(), 0.0);
    }

    #[test]
    fn test_ratio_table_substring_labels_keep_last_occurrence() {
        let cells: CellSequence = vec![
            "Rentabilidad sobre la inversión 5YA".to_string(),
            "10,0".to_string(),
            "Rentabilidad sobre la inversión 5YA (ajustada)".to_string(),
            "12,0".to_string(),
        ];
        let table = RatioTable::from_cells(&cells).unwrap();
        assert_eq!(table.roe_5y().unwrap(), 12.0);
    }

    #[test]
    fn test_ratio_table_missing_label() {
        let table = RatioTable::from_cells(&vec!["x".to_string()]).unwrap();
        match table.payout_ttm().unwrap_err() {
            AnalysisError::MissingRatio { label } => assert_eq!(label, PAYOUT_TTM_LABEL),
            other => panic!("unexpected error: {other}"),
        }
    }
}
