//! Ronda CLI binary.
//!
//! Fetches daily prices for a symbol and backtests simple position rules
//! against them.

mod cmd;
mod data;
mod signals;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Single-asset signal backtesting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch daily prices for a symbol
    Fetch {
        /// Ticker symbol
        symbol: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Backtest a position rule on a symbol
    Backtest {
        /// Ticker symbol
        symbol: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Position rule (long, momentum, reversal)
        #[arg(short, long, default_value = "long")]
        rule: String,

        /// Lookback in trading days for momentum and reversal
        #[arg(short, long, default_value = "20")]
        lookback: usize,

        /// Draw cumulative-return and drawdown charts
        #[arg(long)]
        plot: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default).
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            symbol,
            start,
            end,
            format,
        } => {
            cmd::fetch::run_fetch(&symbol, &start, &end, &format).await?;
        }
        Commands::Backtest {
            symbol,
            start,
            end,
            rule,
            lookback,
            plot,
            format,
        } => {
            cmd::backtest::run_backtest(&symbol, &start, &end, &rule, lookback, plot, &format)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_backtest_defaults() {
        let cli = Cli::try_parse_from([
            "ronda", "backtest", "SPY", "--start", "2023-01-03", "--end", "2023-12-29",
        ])
        .unwrap();
        match cli.command {
            Commands::Backtest {
                symbol,
                rule,
                lookback,
                plot,
                format,
                ..
            } => {
                assert_eq!(symbol, "SPY");
                assert_eq!(rule, "long");
                assert_eq!(lookback, 20);
                assert!(!plot);
                assert_eq!(format, "text");
            }
            Commands::Fetch { .. } => panic!("expected backtest"),
        }
    }

    #[test]
    fn test_parse_requires_dates() {
        assert!(Cli::try_parse_from(["ronda", "fetch", "SPY", "--start", "2023-01-03"]).is_err());
    }
}
