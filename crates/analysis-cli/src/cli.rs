//! Command-line definitions.

use clap::Parser;

/// Fundamental analysis of es.investing.com listed companies.
///
/// Scrapes the annual financial statements, the valuation-ratios page,
/// the quote and the dividend history for one registered ticker, then
/// prints a pass/fail report over the balance sheet, the income
/// statement and a growth-rate valuation of the share price.
#[derive(Debug, Parser)]
#[command(name = "fundamenta", version, about)]
pub struct Cli {
    /// Ticker symbol from the built-in registry (e.g. SQM-B).
    #[arg(required_unless_present = "list")]
    pub symbol: Option<String>,

    /// Projection horizon in years.
    #[arg(short = 'n', long = "years", default_value_t = 5)]
    pub years: u32,

    /// Statement period requested from the provider.
    #[arg(long, default_value = "Annual")]
    pub period: String,

    /// Safety margin (percent) applied to the fair-value estimate.
    #[arg(long, default_value_t = 30.0)]
    pub margin: f64,

    /// Tax rate withheld on dividends, as a fraction (0.0 to 1.0).
    #[arg(long = "dividend-tax", default_value_t = 0.0)]
    pub dividend_tax: f64,

    /// Print a machine-readable JSON summary instead of the report.
    #[arg(long)]
    pub json: bool,

    /// List the registered ticker symbols and exit.
    #[arg(long)]
    pub list: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["fundamenta", "SQM-B"]);
        assert_eq!(cli.symbol.as_deref(), Some("SQM-B"));
        assert_eq!(cli.years, 5);
        assert_eq!(cli.period, "Annual");
        assert_eq!(cli.margin, 30.0);
        assert_eq!(cli.dividend_tax, 0.0);
        assert!(!cli.json);
        assert!(!cli.list);
    }

    #[test]
    fn test_horizon_and_margin_flags() {
        let cli = Cli::parse_from([
            "fundamenta",
            "AAPL",
            "-n",
            "10",
            "--margin",
            "20",
            "--dividend-tax",
            "0.35",
        ]);
        assert_eq!(cli.years, 10);
        assert_eq!(cli.margin, 20.0);
        assert_eq!(cli.dividend_tax, 0.35);
    }

    #[test]
    fn test_list_does_not_require_symbol() {
        let cli = Cli::parse_from(["fundamenta", "--list"]);
        assert!(cli.list);
        assert_eq!(cli.symbol, None);
    }

    #[test]
    fn test_symbol_is_required_without_list() {
        assert!(Cli::try_parse_from(["fundamenta"]).is_err());
    }
}
