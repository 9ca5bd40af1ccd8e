//! Backtesting engine.
//!
//! Runs a single-asset position series against period returns and
//! produces the per-period performance table along with summary
//! statistics.

use polars::prelude::*;
use ronda_traits::{Position, Result, RondaError};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::chart::{ChartRenderer, NoopRenderer, TerminalChart};
use crate::metrics::{
    TRADING_DAYS_PER_YEAR, cumulative_returns, drawdown, final_cumulative_return, max_drawdown,
    sharpe_ratio, strategy_returns, total_pnl,
};

/// Per-period backtest results, one row per input observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTable {
    /// Position chosen at each period
    pub signal: Vec<Position>,
    /// Asset return for each period; NaN where missing
    #[serde(deserialize_with = "nan_vec_from_nulls")]
    pub returns: Vec<f64>,
    /// Return earned by the previous period's position
    pub strategy_returns: Vec<f64>,
    /// Compounded growth of one unit of capital
    pub cumulative_returns: Vec<f64>,
    /// Fractional decline from the running peak (always <= 0)
    pub drawdown: Vec<f64>,
}

impl PerformanceTable {
    /// Number of rows.
    pub const fn len(&self) -> usize {
        self.signal.len()
    }

    /// Returns whether the table has no rows.
    pub const fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    /// Convert to a DataFrame with `signal`, `return`, `strategy_return`,
    /// `cumulative_return` and `drawdown` columns.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let signal: Vec<i32> = self.signal.iter().map(|p| i32::from(p.exposure())).collect();
        let df = df! {
            "signal" => signal,
            "return" => self.returns.clone(),
            "strategy_return" => self.strategy_returns.clone(),
            "cumulative_return" => self.cumulative_returns.clone(),
            "drawdown" => self.drawdown.clone(),
        }?;
        Ok(df)
    }
}

/// Summary statistics derived from a [`PerformanceTable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Sum of strategy returns
    pub total_pnl: f64,
    /// Sharpe ratio (annualized, zero risk-free rate); NaN when undefined
    #[serde(deserialize_with = "nan_from_null")]
    pub sharpe_ratio: f64,
    /// Deepest drawdown (<= 0)
    pub max_drawdown: f64,
    /// Final compounded return, `cumulative[last] - 1`
    pub cumulative_return: f64,
    /// Number of observations
    pub n_periods: usize,
}

impl SummaryStats {
    /// Compute the summary for a finished table.
    pub fn from_table(table: &PerformanceTable) -> Self {
        Self {
            total_pnl: total_pnl(&table.strategy_returns),
            sharpe_ratio: sharpe_ratio(&table.strategy_returns, TRADING_DAYS_PER_YEAR),
            max_drawdown: max_drawdown(&table.drawdown),
            cumulative_return: final_cumulative_return(&table.cumulative_returns),
            n_periods: table.len(),
        }
    }

    /// Whether the Sharpe ratio is defined (non-zero return variance).
    pub const fn is_sharpe_defined(&self) -> bool {
        !self.sharpe_ratio.is_nan()
    }
}

// serde_json writes non-finite floats as `null`; read them back as NaN.
fn nan_from_null<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn nan_vec_from_nulls<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<f64>, D::Error> {
    let values = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Output of [`BacktestEngine::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Summary statistics
    pub stats: SummaryStats,
    /// Full per-period table
    pub table: PerformanceTable,
}

/// Backtesting engine.
#[derive(Debug)]
pub struct BacktestEngine {
    renderer: Box<dyn ChartRenderer>,
}

impl Default for BacktestEngine {
    fn default() -> Self {
        Self::new(TerminalChart::default())
    }
}

impl BacktestEngine {
    /// Create an engine that draws charts with `renderer` when asked to.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use ronda_eval::{BacktestEngine, TerminalChart};
    ///
    /// let engine = BacktestEngine::new(TerminalChart::new(100, 20));
    /// ```
    pub fn new(renderer: impl ChartRenderer + 'static) -> Self {
        Self {
            renderer: Box::new(renderer),
        }
    }

    /// An engine whose charts are discarded.
    pub fn headless() -> Self {
        Self::new(NoopRenderer)
    }

    /// Run the backtest.
    ///
    /// # Arguments
    ///
    /// * `signals` - Position held at each period
    /// * `returns` - Fractional asset return for each period, same length
    /// * `render` - Draw the cumulative-return and drawdown charts
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::LengthMismatch`] when the series lengths differ
    /// and [`RondaError::InvalidInput`] when they are empty. A zero-variance
    /// strategy is not an error: its Sharpe ratio is NaN.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let signals = SignalSeries::from_values(&[0.0, 1.0, 1.0, -1.0])?;
    /// let report = BacktestEngine::headless().run(&signals, &[0.01, 0.02, -0.01, 0.03], false)?;
    /// println!("Total P&L: {:.4}", report.stats.total_pnl);
    /// ```
    pub fn run(
        &self,
        signals: &[Position],
        returns: &[f64],
        render: bool,
    ) -> Result<BacktestReport> {
        if signals.len() != returns.len() {
            return Err(RondaError::LengthMismatch {
                signals: signals.len(),
                returns: returns.len(),
            });
        }
        if signals.is_empty() {
            return Err(RondaError::InvalidInput(
                "signal and return series are empty".to_string(),
            ));
        }

        let strategy = strategy_returns(signals, returns);
        let cumulative = cumulative_returns(&strategy);
        let drawdown = drawdown(&cumulative);

        let table = PerformanceTable {
            signal: signals.to_vec(),
            returns: returns.to_vec(),
            strategy_returns: strategy,
            cumulative_returns: cumulative,
            drawdown,
        };
        let stats = SummaryStats::from_table(&table);

        debug!(
            n_periods = stats.n_periods,
            total_pnl = stats.total_pnl,
            sharpe_ratio = stats.sharpe_ratio,
            max_drawdown = stats.max_drawdown,
            cumulative_return = stats.cumulative_return,
            "backtest complete"
        );

        if render {
            if let Err(e) = self.renderer.render(&table) {
                warn!(error = %e, "failed to render backtest charts");
            }
        }

        Ok(BacktestReport { stats, table })
    }
}
