//! Trading positions and signal series.
//!
//! A signal is a per-period position indicator: short, flat or long. A
//! [`SignalSeries`] is an ordered sequence of positions aligned by index to
//! a return series.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::{Result, RondaError};

/// A position held for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Position {
    /// Short the asset (-1).
    Short,
    /// No position (0).
    #[default]
    Flat,
    /// Long the asset (+1).
    Long,
}

impl Position {
    /// Numeric exposure of the position: -1, 0 or 1.
    #[must_use]
    pub const fn exposure(self) -> i8 {
        match self {
            Self::Short => -1,
            Self::Flat => 0,
            Self::Long => 1,
        }
    }

    /// Exposure as a float multiplier for returns.
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Short => -1.0,
            Self::Flat => 0.0,
            Self::Long => 1.0,
        }
    }

    /// The opposite position; flat stays flat.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Short => Self::Long,
            Self::Flat => Self::Flat,
            Self::Long => Self::Short,
        }
    }

    /// Position matching the sign of `value`. Zero and NaN map to flat.
    #[must_use]
    pub fn from_sign(value: f64) -> Self {
        if value > 0.0 {
            Self::Long
        } else if value < 0.0 {
            Self::Short
        } else {
            Self::Flat
        }
    }
}

impl From<Position> for i8 {
    fn from(position: Position) -> Self {
        position.exposure()
    }
}

impl TryFrom<i8> for Position {
    type Error = RondaError;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            -1 => Ok(Self::Short),
            0 => Ok(Self::Flat),
            1 => Ok(Self::Long),
            other => Err(RondaError::InvalidSignal(f64::from(other))),
        }
    }
}

impl TryFrom<f64> for Position {
    type Error = RondaError;

    fn try_from(value: f64) -> Result<Self> {
        if value == -1.0 {
            Ok(Self::Short)
        } else if value == 0.0 {
            Ok(Self::Flat)
        } else if value == 1.0 {
            Ok(Self::Long)
        } else {
            Err(RondaError::InvalidSignal(value))
        }
    }
}

/// Ordered positions, one per period.
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{Position, SignalSeries};
///
/// let signals = SignalSeries::from_values(&[0.0, 1.0, 1.0, -1.0]).unwrap();
/// assert_eq!(signals[1], Position::Long);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignalSeries(Vec<Position>);

impl SignalSeries {
    /// Wrap an existing list of positions.
    pub const fn new(positions: Vec<Position>) -> Self {
        Self(positions)
    }

    /// Build a series from raw numbers, rejecting anything outside {-1, 0, 1}.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        values
            .iter()
            .map(|&v| Position::try_from(v))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// A series holding the same position for `len` periods.
    pub fn constant(position: Position, len: usize) -> Self {
        Self(vec![position; len])
    }

    /// Exposures as floats.
    pub fn exposures(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.as_f64()).collect()
    }

    /// Consume the series and return the positions.
    pub fn into_inner(self) -> Vec<Position> {
        self.0
    }
}

impl Deref for SignalSeries {
    type Target = [Position];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Position>> for SignalSeries {
    fn from(positions: Vec<Position>) -> Self {
        Self(positions)
    }
}

impl FromIterator<Position> for SignalSeries {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TryFrom<Vec<i8>> for SignalSeries {
    type Error = RondaError;

    fn try_from(values: Vec<i8>) -> Result<Self> {
        values.into_iter().map(Position::try_from).collect()
    }
}
