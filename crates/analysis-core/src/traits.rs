use async_trait::async_trait;

use crate::{AnalysisResult, RawDocuments, TickerMeta};

/// Source of the raw provider documents for one ticker.
///
/// The analysis engine only sees this seam, so tests can hand it
/// pre-extracted cell sequences instead of a live scraper.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn load_documents(
        &self,
        meta: &TickerMeta,
        period: &str,
    ) -> AnalysisResult<RawDocuments>;
}
