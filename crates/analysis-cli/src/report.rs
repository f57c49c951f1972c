//! Console report driver.
//!
//! Prints the analysis in a fixed narrative order: balance sheet health,
//! income statement trends, then the valuation of the share price.
//! Pass/fail criteria render as a green `Si` or a red `No`. Output goes
//! through a generic writer so the section layout is testable against an
//! in-memory sink.

use std::io::Write;

use analysis_core::AnnualSeries;
use console::style;
use fundamental_analysis::{trend, FinancialSnapshot};

fn mark<W: Write>(w: &mut W, passed: bool) -> anyhow::Result<()> {
    if passed {
        writeln!(w, "{}", style("Si").green())?;
    } else {
        writeln!(w, "{}", style("No").red())?;
    }
    writeln!(w)?;
    Ok(())
}

fn series<W: Write>(w: &mut W, title: &str, s: &AnnualSeries) -> anyhow::Result<()> {
    writeln!(w, "{title}:")?;
    writeln!(w, "{s}")?;
    writeln!(w)?;
    Ok(())
}

fn scalar<W: Write>(w: &mut W, title: &str, value: impl std::fmt::Display) -> anyhow::Result<()> {
    writeln!(w, "{title}:")?;
    writeln!(w, "{value}")?;
    writeln!(w)?;
    Ok(())
}

/// ROE is painted green only when it clears 15% after 2-decimal rounding.
fn roe_is_strong(roe: f64) -> bool {
    (roe * 100.0).round() / 100.0 > 15.0
}

/// Trend line plus its growth verdict.
fn growing<W: Write>(w: &mut W, title: &str, s: &AnnualSeries) -> anyhow::Result<()> {
    let slope = trend::growth_slope(s);
    scalar(w, &format!("razon crecimiento {title}"), slope)?;
    writeln!(w, "{title} creciente?:")?;
    mark(w, trend::is_growing(slope))
}

pub fn print_report<W: Write>(
    w: &mut W,
    snap: &FinancialSnapshot,
    safety_margin_pct: f64,
    dividend_tax: f64,
) -> anyhow::Result<()> {
    scalar(w, "nombre de la accion", snap.symbol())?;

    balance_section(w, snap)?;
    income_section(w, snap)?;
    valuation_section(w, snap, safety_margin_pct, dividend_tax)?;

    Ok(())
}

/// Balance sheet: the photograph of the company.
///
/// Criteria: positive working capital, current ratio and acid test at
/// least 1, no more than half the assets financed with debt, growing
/// total assets and equity, share count constant or shrinking.
fn balance_section<W: Write>(w: &mut W, snap: &FinancialSnapshot) -> anyhow::Result<()> {
    let current_assets = snap.current_assets()?;
    let total_assets = snap.total_assets()?;
    let equity = snap.equity()?;
    let shares = snap.shares_outstanding()?;

    series(w, "total activo circulante", &current_assets)?;
    series(w, "total pasivo circulante", &snap.current_liabilities()?)?;
    series(w, "total capital de trabajo", &snap.working_capital_series()?)?;
    series(w, "total razon corriente", &snap.current_ratio_series()?)?;
    series(w, "total inventario", &snap.inventory()?)?;
    series(w, "total test acido", &snap.acid_test_series()?)?;
    series(w, "activos totales", &total_assets)?;
    series(w, "pasivos totales", &snap.total_liabilities()?)?;
    series(w, "total razon endeudamiento", &snap.debt_ratio_series()?)?;

    let assets_slope = trend::growth_slope(&total_assets);
    scalar(w, "razon crecimiento activos totales", assets_slope)?;

    let current_assets_slope = trend::growth_slope(&current_assets);
    scalar(
        w,
        "razon crecimiento activos circulantes",
        current_assets_slope,
    )?;

    series(w, "patrimonio neto", &equity)?;
    let equity_slope = trend::growth_slope(&equity);
    scalar(w, "razon crecimiento patrimonio", equity_slope)?;

    series(w, "acciones circulando", &shares)?;
    let shares_slope = trend::growth_slope(&shares);
    scalar(w, "razon crecimiento acciones", shares_slope)?;

    let wc = snap.check_working_capital()?;
    scalar(w, "total capital de trabajo positivo?", wc.mean)?;
    mark(w, wc.passed)?;

    let cr = snap.check_current_ratio()?;
    scalar(w, "razon corriente > 1?", cr.mean)?;
    mark(w, cr.passed)?;

    let acid = snap.check_acid_test()?;
    scalar(w, "test acido > 1?", acid.mean)?;
    mark(w, acid.passed)?;

    let debt = snap.check_debt_ratio()?;
    scalar(w, "razon endeudamiento menor a 0.5?", debt.mean)?;
    mark(w, debt.passed)?;

    writeln!(w, "razon crecimiento activos > 0:")?;
    mark(w, trend::is_growing(assets_slope))?;

    writeln!(w, "activos circulantes crecientes?:")?;
    mark(w, trend::is_growing(current_assets_slope))?;

    writeln!(w, "patrimonio creciente?:")?;
    mark(w, trend::is_growing(equity_slope))?;

    writeln!(w, "acciones constantes o disminuyendo?:")?;
    mark(w, trend::is_shrinking(shares_slope))?;

    Ok(())
}

/// Income statement: revenue and margins over the period.
///
/// Criteria: revenue, gross margin, operating result, net income and
/// EPS all growing; ROE above 15%.
fn income_section<W: Write>(w: &mut W, snap: &FinancialSnapshot) -> anyhow::Result<()> {
    let revenue = snap.revenue()?;
    series(w, "total ingresos", &revenue)?;
    growing(w, "ingresos", &revenue)?;

    let gross = snap.gross_profit()?;
    series(w, "total margen bruto", &gross)?;
    series(
        w,
        "total margen bruto calculado (%)",
        &snap.computed_gross_margin_series()?,
    )?;
    growing(w, "margen bruto", &gross)?;

    let operating = snap.operating_result()?;
    series(w, "total resultado explotacion", &operating)?;
    growing(w, "resultado explotacion", &operating)?;

    let net = snap.net_income()?;
    series(w, "total resultado ejercicio", &net)?;
    growing(w, "resultado ejercicio", &net)?;

    let eps = snap.eps()?;
    series(w, "total beneficio por accion (EPS)", &eps)?;
    growing(w, "beneficio por accion", &eps)?;

    writeln!(w, "ROE (%):")?;
    let roe = snap.roe();
    if roe_is_strong(roe) {
        writeln!(w, "{}", style(roe).green())?;
    } else {
        writeln!(w, "{}", style(roe).red())?;
    }
    writeln!(w)?;

    scalar(w, "ROE ajustado (%)", snap.adjusted_roe())?;

    Ok(())
}

/// Valuation: growth rate, projected price, and the fair-value call.
fn valuation_section<W: Write>(
    w: &mut W,
    snap: &FinancialSnapshot,
    safety_margin_pct: f64,
    dividend_tax: f64,
) -> anyhow::Result<()> {
    scalar(w, "tasa de reparto (%)", snap.payout_ratio())?;
    scalar(w, "tasa de crecimiento (%)", snap.growth_rate())?;
    scalar(w, "tipo de empresa", snap.growth_class().to_label())?;
    scalar(w, "eps futuro", snap.future_eps())?;
    scalar(
        w,
        &format!("precio accion a {} años", snap.horizon()),
        snap.future_price(),
    )?;
    scalar(w, "precio actual", snap.current_price())?;
    scalar(
        w,
        "tasa promedio últimos dividendos (%)",
        snap.dividend_yield(),
    )?;
    scalar(
        w,
        "rentabilidad (%)",
        snap.implied_annual_return(dividend_tax),
    )?;
    scalar(w, "valor bolsa/libro", snap.price_to_book())?;
    scalar(
        w,
        "analisis valor bolsa/libro",
        snap.price_to_book_band().to_label(),
    )?;
    scalar(w, "ratio precio / utilidad (PER)", snap.per())?;
    series(w, "deuda total / patrimonio", &snap.debt_to_equity_series()?)?;
    series(w, "valor libro ajustado", &snap.book_value_series()?)?;
    scalar(w, "earnings yield (EPS/P) (%)", snap.earnings_yield())?;
    scalar(w, "dividend yield (D/P) (%)", snap.dividend_yield_5y()?)?;
    scalar(w, "dividend growth yield (%)", snap.dividend_growth_rate()?)?;

    series(w, "FCF / patrimonio (%)", &snap.fcf_to_equity_series()?)?;
    series(w, "DPS / EPS", &snap.dps_to_eps_series()?)?;
    series(w, "(AC - caja) / costo de venta", &snap.casanegra_series()?)?;

    match snap.peg() {
        Some(peg) => scalar(w, "PEG", peg)?,
        None => scalar(w, "PEG", "indefinido (sin crecimiento)")?,
    }

    match snap.fair_value(safety_margin_pct) {
        Some(fv) => {
            scalar(w, "valor justo (hoy)", fv.present_value)?;
            scalar(
                w,
                &format!("valor justo con margen de seguridad ({safety_margin_pct}%)"),
                fv.adjusted_value,
            )?;
            writeln!(w, "recomendacion:")?;
            match fv.recommendation {
                analysis_core::Recommendation::Buy => {
                    writeln!(w, "{}", style(fv.recommendation.to_label()).green())?
                }
                analysis_core::Recommendation::Wait => {
                    writeln!(w, "{}", style(fv.recommendation.to_label()).red())?
                }
            }
            writeln!(w)?;
        }
        None => scalar(w, "valor justo", "indefinido (sin crecimiento)")?,
    }

    Ok(())
}
