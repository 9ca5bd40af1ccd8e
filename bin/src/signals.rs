//! Position rules for the ronda CLI.

use ronda_traits::{Position, RondaError, SignalSeries};
use std::fmt;

/// Rule that turns a close-price history into a position per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignalRule {
    /// Always long.
    Long,
    /// Sign of the trailing `lookback`-day return.
    Momentum { lookback: usize },
    /// Negated momentum.
    Reversal { lookback: usize },
}

impl SignalRule {
    /// Position for every close, aligned with the input.
    ///
    /// The position on day `i` only looks at closes up to and including
    /// day `i`; the engine applies it to day `i + 1`. Days without
    /// `lookback` prior closes are flat.
    pub(crate) fn generate(&self, closes: &[f64]) -> SignalSeries {
        match *self {
            Self::Long => SignalSeries::constant(Position::Long, closes.len()),
            Self::Momentum { lookback } => trailing_sign(closes, lookback).collect(),
            Self::Reversal { lookback } => trailing_sign(closes, lookback)
                .map(Position::inverse)
                .collect(),
        }
    }
}

impl fmt::Display for SignalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Momentum { lookback } => write!(f, "momentum({lookback})"),
            Self::Reversal { lookback } => write!(f, "reversal({lookback})"),
        }
    }
}

fn trailing_sign(closes: &[f64], lookback: usize) -> impl Iterator<Item = Position> + '_ {
    (0..closes.len()).map(move |i| {
        if i < lookback {
            return Position::Flat;
        }
        let past = closes[i - lookback];
        if past.is_finite() && past > 0.0 {
            Position::from_sign(closes[i] / past - 1.0)
        } else {
            Position::Flat
        }
    })
}

/// Create a rule by name.
pub(crate) fn create_rule(name: &str, lookback: usize) -> Result<SignalRule, RondaError> {
    let needs_lookback = |rule: SignalRule| {
        if lookback == 0 {
            Err(RondaError::InvalidInput(format!(
                "Rule '{}' needs a lookback of at least 1 day",
                name
            )))
        } else {
            Ok(rule)
        }
    };

    match name.trim().to_lowercase().as_str() {
        "long" | "buy_and_hold" => Ok(SignalRule::Long),
        "momentum" | "mom" => needs_lookback(SignalRule::Momentum { lookback }),
        "reversal" | "rev" => needs_lookback(SignalRule::Reversal { lookback }),
        _ => Err(RondaError::InvalidInput(format!(
            "Unknown rule: '{}'. Expected one of: long, momentum, reversal",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::{Flat, Long, Short};

    #[test]
    fn test_create_rules() {
        assert_eq!(create_rule("long", 0).unwrap(), SignalRule::Long);
        assert_eq!(
            create_rule("Momentum", 5).unwrap(),
            SignalRule::Momentum { lookback: 5 }
        );
        assert_eq!(create_rule("rev", 3).unwrap(), SignalRule::Reversal { lookback: 3 });
    }

    #[test]
    fn test_unknown_rule() {
        assert!(matches!(create_rule("carry", 5), Err(RondaError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_lookback_rejected() {
        assert!(create_rule("momentum", 0).is_err());
    }

    #[test]
    fn test_long_rule() {
        let signals = SignalRule::Long.generate(&[1.0, 2.0, 3.0]);
        assert_eq!(&*signals, &[Long, Long, Long]);
    }

    #[test]
    fn test_momentum_and_reversal() {
        let closes = [100.0, 101.0, 103.0, 102.0, 99.0, 99.0];

        let momentum = SignalRule::Momentum { lookback: 2 }.generate(&closes);
        assert_eq!(&*momentum, &[Flat, Flat, Long, Long, Short, Short]);

        let reversal = SignalRule::Reversal { lookback: 2 }.generate(&closes);
        assert_eq!(&*reversal, &[Flat, Flat, Short, Short, Long, Long]);
    }

    #[test]
    fn test_momentum_short_history_is_flat() {
        let signals = SignalRule::Momentum { lookback: 10 }.generate(&[1.0, 2.0]);
        assert_eq!(&*signals, &[Flat, Flat]);
        assert!(SignalRule::Momentum { lookback: 3 }.generate(&[]).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(SignalRule::Momentum { lookback: 20 }.to_string(), "momentum(20)");
    }
}
