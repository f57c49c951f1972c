mod cli;
mod report;
mod summary;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use analysis_core::DocumentSource;
use fundamental_analysis::FinancialSnapshot;
use investing_client::{registry, InvestingClient};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list {
        for symbol in registry::symbols() {
            println!("{symbol}");
        }
        return Ok(());
    }

    // clap enforces the symbol when --list is absent
    let symbol = cli.symbol.as_deref().unwrap_or_default();
    let meta = registry::lookup(symbol)?;

    tracing::info!(symbol, period = %cli.period, years = cli.years, "loading documents");
    let client = InvestingClient::new();
    let raw = client
        .load_documents(&meta, &cli.period)
        .await
        .with_context(|| format!("loading documents for {symbol}"))?;

    let snapshot = FinancialSnapshot::derive(symbol, raw, cli.years)
        .with_context(|| format!("deriving snapshot for {symbol}"))?;

    if cli.json {
        let summary = summary::Summary::build(&snapshot, cli.margin, cli.dividend_tax)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let stdout = std::io::stdout();
        report::print_report(&mut stdout.lock(), &snapshot, cli.margin, cli.dividend_tax)?;
    }
    Ok(())
}
