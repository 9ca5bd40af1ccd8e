//! Backtest command implementation.

use crate::data::{self, Window};
use crate::signals;
use anyhow::Result;
use ronda_eval::{BacktestEngine, SummaryStats};
use tracing::debug;

/// Run a backtest of a position rule on one symbol.
pub(crate) async fn run_backtest(
    symbol: &str,
    start: &str,
    end: &str,
    rule: &str,
    lookback: usize,
    plot: bool,
    format: &str,
) -> Result<()> {
    let window = Window::parse(start, end)?;
    let rule = signals::create_rule(rule, lookback)?;

    let Some(prices) = data::load_prices(symbol, window).await? else {
        println!(
            "No price data for {} between {} and {}",
            symbol.to_uppercase(),
            window.start,
            window.end
        );
        return Ok(());
    };

    let returns = prices.returns();
    let signals = rule.generate(&prices.closes());
    debug!(symbol = prices.symbol(), %rule, rows = returns.len(), "running backtest");

    let engine = BacktestEngine::default();
    let report = engine.run(&signals, &returns, plot && format != "json")?;

    if format == "json" {
        let json = serde_json::to_string_pretty(&serde_json::json!({
            "symbol": prices.symbol(),
            "rule": rule.to_string(),
            "start": prices.first_date(),
            "end": prices.last_date(),
            "stats": report.stats,
        }))
        .map_err(|e| anyhow::anyhow!("JSON serialization error: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                       Backtesting                            ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Symbol:   {}", prices.symbol());
    println!("Rule:     {}", rule);
    if let (Some(first), Some(last)) = (prices.first_date(), prices.last_date()) {
        println!("Period:   {} to {}", first, last);
    }
    println!();

    print!("{}", format_stats(&report.stats));
    Ok(())
}

fn format_stats(stats: &SummaryStats) -> String {
    let sharpe = if stats.is_sharpe_defined() {
        format!("{:>10.2}", stats.sharpe_ratio)
    } else {
        format!("{:>10}", "N/A")
    };

    [
        "Performance Metrics:".to_string(),
        format!("  Periods:           {:>10}", stats.n_periods),
        format!("  Total P&L:         {:>10.2}%", stats.total_pnl * 100.0),
        format!("  Cumulative Return: {:>10.2}%", stats.cumulative_return * 100.0),
        format!("  Sharpe Ratio:      {}", sharpe),
        format!("  Max Drawdown:      {:>10.2}%", stats.max_drawdown * 100.0),
        String::new(),
    ]
    .join("\n")
}
