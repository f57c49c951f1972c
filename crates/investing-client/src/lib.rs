//! Scraping client for the provider's financial pages.
//!
//! Fetches the balance sheet, income statement, cash-flow statement,
//! ratios, quote, and dividends pages for one ticker and reduces each to
//! the ordered sequence of its table-cell texts. Interpretation of those
//! cells (offsets, labels) belongs to `fundamental-analysis`.

pub mod registry;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use analysis_core::{
    AnalysisError, AnalysisResult, CellSequence, DocumentSource, RawDocuments, TickerMeta,
};

const FINANCIALS_BASE_URL: &str =
    "https://es.investing.com/instruments/Financials/changereporttypeajax?action=change_report_type&pair_ID=";
const EQUITIES_BASE_URL: &str = "https://es.investing.com/equities/";

/// Statement selector for the financials endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Balance,
    Income,
    CashFlow,
}

impl ReportType {
    fn code(&self) -> &'static str {
        match self {
            ReportType::Balance => "BAL",
            ReportType::Income => "INC",
            ReportType::CashFlow => "CAS",
        }
    }

    fn document(&self) -> &'static str {
        match self {
            ReportType::Balance => "balance sheet",
            ReportType::Income => "income statement",
            ReportType::CashFlow => "cash-flow statement",
        }
    }
}

/// HTTP client for the provider.
///
/// No retry or backoff: a failed fetch aborts the ticker's analysis with
/// a `Fetch` error naming the document.
#[derive(Clone)]
pub struct InvestingClient {
    client: Client,
}

impl InvestingClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn get_html(&self, url: &str, document: &'static str) -> AnalysisResult<String> {
        tracing::debug!(%url, document, "fetching document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AnalysisError::Fetch {
                document,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Fetch {
                document,
                reason: format!("HTTP {status}"),
            });
        }

        response.text().await.map_err(|e| AnalysisError::Fetch {
            document,
            reason: e.to_string(),
        })
    }

    /// One financial statement's `<td>` cells for the last four years.
    pub async fn fetch_statement(
        &self,
        meta: &TickerMeta,
        report: ReportType,
        period: &str,
    ) -> AnalysisResult<CellSequence> {
        let url = format!(
            "{FINANCIALS_BASE_URL}{}&report_type={}&period_type={}",
            meta.provider_id,
            report.code(),
            period
        );
        let html = self.get_html(&url, report.document()).await?;
        Ok(extract_cells(&html, "td"))
    }

    /// The valuation-ratios page's `<td>` cells.
    pub async fn fetch_ratios(&self, meta: &TickerMeta) -> AnalysisResult<CellSequence> {
        let url = format!("{EQUITIES_BASE_URL}{}-ratios", meta.slug);
        let html = self.get_html(&url, "ratios page").await?;
        Ok(extract_cells(&html, "td"))
    }

    /// The quote page's `<span>` texts; the current price sits right
    /// after the "Resumen" span.
    pub async fn fetch_quote(&self, meta: &TickerMeta) -> AnalysisResult<CellSequence> {
        let url = format!("{EQUITIES_BASE_URL}{}", meta.slug);
        let html = self.get_html(&url, "quote page").await?;
        Ok(extract_cells(&html, "span"))
    }

    /// The dividend-history page's `<td>` cells.
    pub async fn fetch_dividends(&self, meta: &TickerMeta) -> AnalysisResult<CellSequence> {
        let url = format!("{EQUITIES_BASE_URL}{}-dividends", meta.slug);
        let html = self.get_html(&url, "dividends page").await?;
        Ok(extract_cells(&html, "td"))
    }
}

impl Default for InvestingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentSource for InvestingClient {
    /// Fetch every document for one ticker. The pages share no state, so
    /// they are fetched concurrently; the first failure wins.
    async fn load_documents(
        &self,
        meta: &TickerMeta,
        period: &str,
    ) -> AnalysisResult<RawDocuments> {
        let (balance, income, cash_flow, ratios, quote_spans, dividend_cells) = tokio::try_join!(
            self.fetch_statement(meta, ReportType::Balance, period),
            self.fetch_statement(meta, ReportType::Income, period),
            self.fetch_statement(meta, ReportType::CashFlow, period),
            self.fetch_ratios(meta),
            self.fetch_quote(meta),
            self.fetch_dividends(meta),
        )?;

        let raw = RawDocuments {
            balance,
            income,
            cash_flow,
            ratios,
            quote_spans,
            dividend_cells,
        };
        raw.validate()?;

        tracing::info!(
            symbol = %meta.symbol,
            balance_cells = raw.balance.len(),
            income_cells = raw.income.len(),
            cash_flow_cells = raw.cash_flow.len(),
            ratio_cells = raw.ratios.len(),
            "documents loaded"
        );

        Ok(raw)
    }
}

/// Every matching node's text, in source order.
fn extract_cells(html: &str, selector: &str) -> CellSequence {
    let document = Html::parse_document(html);
    match Selector::parse(selector) {
        Ok(sel) => document
            .select(&sel)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cells_in_source_order() {
        let html = r#"
            <html><body><table>
                <tr><td>Activos</td><td>1.234,5</td></tr>
                <tr><td>-</td><td>56,7%</td></tr>
            </table></body></html>
        "#;
        let cells = extract_cells(html, "td");
        assert_eq!(cells, vec!["Activos", "1.234,5", "-", "56,7%"]);
    }

    #[test]
    fn test_extract_cells_joins_nested_text() {
        let html = r#"<table><tr><td><span>1.085</span>,<span>50</span></td></tr></table>"#;
        let cells = extract_cells(html, "td");
        assert_eq!(cells, vec!["1.085,50"]);
    }

    #[test]
    fn test_extract_spans() {
        let html = r#"<span>Resumen</span><span>43.120,00</span>"#;
        let cells = extract_cells(html, "span");
        assert_eq!(cells, vec!["Resumen", "43.120,00"]);
    }

    #[tokio::test]
    #[ignore] // live network probe
    async fn test_fetch_sqm_documents() {
        let client = InvestingClient::new();
        let meta = registry::lookup("SQM-B").unwrap();
        let raw = client.load_documents(&meta, "Annual").await.unwrap();
        assert!(raw.balance.len() > 200);
        assert!(raw.income.len() > 150);
    }
}
