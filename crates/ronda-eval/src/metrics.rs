//! Performance metrics over a strategy-return sequence.
//!
//! Every function here is a closed-form fold over an ordered slice:
//! - Strategy returns from lagged positions
//! - Compounded cumulative returns
//! - Total P&L, annualized Sharpe ratio
//! - Running-peak drawdown and its minimum

use ndarray::ArrayView1;
use ronda_traits::Position;

/// Trading periods per year used to annualize the Sharpe ratio.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Returns earned by holding each period's position into the next period.
///
/// `out[0]` is `0.0` because no position is held before the first
/// observation; for `i >= 1`, `out[i] = signals[i - 1] * returns[i]`.
/// A non-finite product (e.g. a missing return) contributes `0.0`.
///
/// Only the common prefix of the two slices is used; callers validate
/// lengths beforehand.
///
/// # Example
///
/// ```rust,ignore
/// use ronda_eval::metrics::strategy_returns;
/// use ronda_traits::Position::{Flat, Long, Short};
///
/// let out = strategy_returns(&[Flat, Long, Long, Short], &[0.01, 0.02, -0.01, 0.03]);
/// assert_eq!(out, vec![0.0, 0.0, -0.01, 0.03]);
/// ```
pub fn strategy_returns(signals: &[Position], returns: &[f64]) -> Vec<f64> {
    let n = signals.len().min(returns.len());
    let mut out = Vec::with_capacity(n);
    if n == 0 {
        return out;
    }

    out.push(0.0);
    for (held, &ret) in signals[..n - 1].iter().zip(&returns[1..n]) {
        let pnl = held.as_f64() * ret;
        out.push(if pnl.is_finite() { pnl } else { 0.0 });
    }
    out
}

/// Running product of `1 + r`.
pub fn cumulative_returns(strategy_returns: &[f64]) -> Vec<f64> {
    strategy_returns
        .iter()
        .scan(1.0, |wealth, &r| {
            *wealth *= 1.0 + r;
            Some(*wealth)
        })
        .collect()
}

/// Sum of strategy returns.
pub fn total_pnl(strategy_returns: &[f64]) -> f64 {
    strategy_returns.iter().sum()
}

/// Annualized Sharpe ratio with a zero risk-free rate.
///
/// Uses the sample standard deviation (N-1 denominator). Returns `NaN`
/// when fewer than two observations are available or every observation is
/// identical; a flat strategy has no defined risk-adjusted return. The
/// ratio does not depend on the scale of the returns.
pub fn sharpe_ratio(strategy_returns: &[f64], periods_per_year: usize) -> f64 {
    let [first, rest @ ..] = strategy_returns else {
        return f64::NAN;
    };
    // exact comparison: rounding in the mean must not fake a variance
    if rest.is_empty() || rest.iter().all(|r| r == first) {
        return f64::NAN;
    }

    let view = ArrayView1::from(strategy_returns);
    let Some(mean) = view.mean() else {
        return f64::NAN;
    };
    let std = view.std(1.0);

    if std.is_finite() && std > 0.0 {
        mean / std * (periods_per_year as f64).sqrt()
    } else {
        f64::NAN
    }
}

/// Highest cumulative value seen so far at each point.
pub fn running_max(cumulative_returns: &[f64]) -> Vec<f64> {
    cumulative_returns
        .iter()
        .scan(f64::NEG_INFINITY, |peak, &c| {
            *peak = peak.max(c);
            Some(*peak)
        })
        .collect()
}

/// Fractional decline from the running peak, `(c - peak) / peak`.
///
/// Every value is `<= 0`. A non-positive peak (the strategy was wiped out
/// from the very first period) is reported as `-1.0`.
pub fn drawdown(cumulative_returns: &[f64]) -> Vec<f64> {
    cumulative_returns
        .iter()
        .zip(running_max(cumulative_returns))
        .map(|(&c, peak)| {
            if peak > 0.0 {
                ((c - peak) / peak).min(0.0)
            } else {
                -1.0
            }
        })
        .collect()
}

/// Deepest drawdown; `0.0` for an empty series.
pub fn max_drawdown(drawdown: &[f64]) -> f64 {
    drawdown.iter().copied().fold(0.0, f64::min)
}

/// Compounded return over the whole series, `cumulative[last] - 1`.
pub fn final_cumulative_return(cumulative_returns: &[f64]) -> f64 {
    cumulative_returns.last().map_or(0.0, |c| c - 1.0)
}
