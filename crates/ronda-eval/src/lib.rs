//! Backtesting and performance statistics for ronda.
//!
//! This crate evaluates a single-asset position series against period returns:
//! - Strategy returns with a one-period position lag
//! - Compounded cumulative returns and running-peak drawdown
//! - Total P&L, annualized Sharpe ratio, maximum drawdown
//! - Optional text charts of the cumulative-return and drawdown curves
//!
//! # Example
//!
//! ```rust,ignore
//! use ronda_eval::BacktestEngine;
//! use ronda_traits::SignalSeries;
//!
//! let signals = SignalSeries::from_values(&[0.0, 1.0, 1.0, -1.0])?;
//! let returns = [0.01, 0.02, -0.01, 0.03];
//!
//! let report = BacktestEngine::default().run(&signals, &returns, true)?;
//! println!("Sharpe Ratio: {:.2}", report.stats.sharpe_ratio);
//! println!("Max Drawdown: {:.2}%", report.stats.max_drawdown * 100.0);
//! ```

pub mod backtest;
pub mod chart;
pub mod metrics;

// Re-export main types
pub use backtest::{BacktestEngine, BacktestReport, PerformanceTable, SummaryStats};
pub use chart::{ChartRenderer, LineChart, NoopRenderer, TerminalChart};
pub use metrics::TRADING_DAYS_PER_YEAR;
