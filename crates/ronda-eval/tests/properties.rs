//! Property-based tests for the backtest engine.
//!
//! These check the table invariants across many random position and return
//! series rather than a handful of fixed cases.

use proptest::prelude::*;
use ronda_eval::{
    BacktestEngine,
    metrics::{cumulative_returns, final_cumulative_return, total_pnl},
};
use ronda_traits::Position;

fn position() -> impl Strategy<Value = Position> {
    prop_oneof![
        Just(Position::Short),
        Just(Position::Flat),
        Just(Position::Long)
    ]
}

/// Aligned signal and return series of equal length.
fn aligned(max_len: usize) -> impl Strategy<Value = (Vec<Position>, Vec<f64>)> {
    (1..max_len).prop_flat_map(|n| {
        (
            prop::collection::vec(position(), n),
            prop::collection::vec(-0.5f64..0.5f64, n),
        )
    })
}

proptest! {
    /// Drawdown never rises above zero.
    #[test]
    fn drawdown_is_never_positive((signals, returns) in aligned(200)) {
        let report = BacktestEngine::headless().run(&signals, &returns, false).unwrap();
        for dd in &report.table.drawdown {
            prop_assert!(*dd <= 0.0, "drawdown should be <= 0, got {}", dd);
        }
        prop_assert!(report.stats.max_drawdown <= 0.0);
        prop_assert!(report.stats.max_drawdown >= -1.0);
    }

    /// Compounding strictly-greater-than -1 returns keeps wealth non-negative.
    #[test]
    fn cumulative_return_stays_non_negative((signals, returns) in aligned(200)) {
        let report = BacktestEngine::headless().run(&signals, &returns, false).unwrap();
        for c in &report.table.cumulative_returns {
            prop_assert!(*c >= 0.0, "cumulative return should be >= 0, got {}", c);
        }
    }

    /// The first period never earns anything, whatever the position.
    #[test]
    fn first_strategy_return_is_zero((signals, returns) in aligned(50)) {
        let report = BacktestEngine::headless().run(&signals, &returns, false).unwrap();
        prop_assert_eq!(report.table.strategy_returns[0], 0.0);
        prop_assert_eq!(report.table.cumulative_returns[0], 1.0);
    }

    /// Flat positions produce a flat equity curve.
    #[test]
    fn flat_signals_earn_nothing(returns in prop::collection::vec(-0.5f64..0.5f64, 1..100)) {
        let signals = vec![Position::Flat; returns.len()];
        let report = BacktestEngine::headless().run(&signals, &returns, false).unwrap();
        prop_assert_eq!(report.stats.total_pnl, 0.0);
        prop_assert_eq!(report.stats.max_drawdown, 0.0);
        prop_assert_eq!(report.stats.cumulative_return, 0.0);
        prop_assert!(report.stats.sharpe_ratio.is_nan());
    }

    /// Total P&L and final compounded return are folds that do not depend
    /// on the order of the strategy returns.
    #[test]
    fn pnl_and_compounding_are_order_independent(
        strategy in prop::collection::vec(-0.5f64..0.5f64, 1..100),
        seed in any::<u64>(),
    ) {
        let mut shuffled = strategy.clone();
        // Deterministic rotation plus reversal keyed on the seed.
        let k = (seed as usize) % shuffled.len();
        shuffled.rotate_left(k);
        if seed % 2 == 0 {
            shuffled.reverse();
        }

        let pnl_a = total_pnl(&strategy);
        let pnl_b = total_pnl(&shuffled);
        prop_assert!((pnl_a - pnl_b).abs() < 1e-9, "{} vs {}", pnl_a, pnl_b);

        let cum_a = final_cumulative_return(&cumulative_returns(&strategy));
        let cum_b = final_cumulative_return(&cumulative_returns(&shuffled));
        let tolerance = 1e-9 * cum_a.abs().max(1.0);
        prop_assert!((cum_a - cum_b).abs() < tolerance, "{} vs {}", cum_a, cum_b);
    }

    /// Sharpe is either NaN or finite, never infinite.
    #[test]
    fn sharpe_is_nan_or_finite((signals, returns) in aligned(100)) {
        let report = BacktestEngine::headless().run(&signals, &returns, false).unwrap();
        let sharpe = report.stats.sharpe_ratio;
        prop_assert!(sharpe.is_nan() || sharpe.is_finite());
    }
}
