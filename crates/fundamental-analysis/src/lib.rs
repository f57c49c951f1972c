//! Fundamental analysis engine: positional statement schema, per-year
//! ratios, four-year trends, and the growth-rate valuation chain, all
//! assembled into a [`FinancialSnapshot`].

pub mod ratios;
pub mod schema;
pub mod snapshot;
pub mod trend;
pub mod valuation;

pub use schema::{annual_series, LineItem, RatioTable, Statement};
pub use snapshot::{Check, FinancialSnapshot};
pub use valuation::FairValue;
