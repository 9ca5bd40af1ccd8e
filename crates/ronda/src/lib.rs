#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! Single-asset signal backtesting.
//!
//! ronda is an umbrella crate that re-exports the ronda sub-crates. It
//! fetches daily prices for one symbol, runs a position series against the
//! period returns, and reports total P&L, Sharpe ratio and maximum drawdown.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ronda::prelude::*;
//!
//! # async fn example() -> ronda::Result<()> {
//! let provider = DataConfig::from_env()?.build_provider()?;
//! let fetcher = DataFetcher::new(provider);
//!
//! let start = Date::from_ymd_opt(2023, 1, 3).unwrap();
//! let end = Date::from_ymd_opt(2023, 12, 29).unwrap();
//! let Some(prices) = fetcher.fetch("SPY", start, end).await else {
//!     return Ok(());
//! };
//!
//! let returns = prices.returns();
//! let signals = SignalSeries::constant(Position::Long, returns.len());
//! let report = BacktestEngine::default().run(&signals, &returns, false)?;
//! println!("Sharpe Ratio: {:.2}", report.stats.sharpe_ratio);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Price series, positions, the provider trait and errors
//! - [`eval`] - Backtest engine, statistics and text charts
//! - [`data`] - Yahoo Finance and FMP providers, the data fetcher

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Shared types and the provider seam.
pub mod traits {
    pub use ronda_traits::*;
}

pub use ronda_traits::{
    Date, Position, PriceBar, PriceProvider, PriceSeries, Result, RondaError, SignalSeries,
    Symbol,
};

// ============================================================================
// Backtesting
// ============================================================================

/// Backtest engine and performance statistics.
///
/// Strategy returns lag the position by one period:
///
/// ```text
/// strategy_return_t = position_{t-1} * return_t
/// cumulative_t      = prod_{k<=t} (1 + strategy_return_k)
/// drawdown_t        = (cumulative_t - max_{k<=t} cumulative_k) / max_{k<=t} cumulative_k
/// sharpe            = mean / std * sqrt(252)
/// ```
pub mod eval {
    pub use ronda_eval::*;
}

pub use ronda_eval::{BacktestEngine, BacktestReport, PerformanceTable, SummaryStats};

// ============================================================================
// Data Providers
// ============================================================================

/// Daily price providers.
///
/// Yahoo Finance is used unless `RONDA_PROVIDER=fmp`, in which case
/// `FMP_API_KEY` must be set.
pub mod data {
    pub use ronda_data::*;
}

pub use ronda_data::{DataConfig, DataFetcher};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use ronda::prelude::*;
/// ```
pub mod prelude {
    pub use crate::traits::*;
    pub use crate::{BacktestEngine, BacktestReport, DataConfig, DataFetcher, SummaryStats};
}
