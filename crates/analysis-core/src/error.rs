use thiserror::Error;

/// Failures that abort the analysis of one ticker.
///
/// Division guards are deliberately absent: a ratio with a non-positive
/// denominator yields `0.0` for that year and logs a warning instead of
/// surfacing here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Symbol is not in the ticker registry.
    #[error("unknown ticker: {0}")]
    UnknownTicker(String),

    /// Transport failure or non-2xx status while fetching one document.
    #[error("failed to fetch {document}: {reason}")]
    Fetch {
        document: &'static str,
        reason: String,
    },

    /// An expected cell offset is not present in the extracted sequence.
    /// Almost always means the provider changed the page layout.
    #[error("layout mismatch in {statement}: {line_item} expects cell {offset} but the page has {len} cells")]
    LayoutMismatch {
        statement: &'static str,
        line_item: &'static str,
        offset: usize,
        len: usize,
    },

    /// A cell that should hold a number holds something else.
    #[error("cannot parse cell {text:?} while reading {context}")]
    InvalidCell { context: String, text: String },

    /// A named ratio label was not found on the ratios page.
    #[error("ratio label not found on page: {label}")]
    MissingRatio { label: &'static str },

    /// A derived scalar could not be computed; names the first field in
    /// the derivation order that failed.
    #[error("could not compute field: {field}")]
    MissingField { field: &'static str },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
