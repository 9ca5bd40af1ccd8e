//! Common types used throughout ronda.
//!
//! This module defines the daily price bar, the ordered price series a
//! provider produces, and the date and symbol aliases.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, typically a ticker like "AAPL" or "SPY".
pub type Symbol = String;

/// One daily OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date.
    pub date: Date,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

/// Daily price history for a single symbol.
///
/// Rows are ascending by date with no duplicate dates. The series is
/// immutable once built; [`PriceSeries::new`] establishes the ordering.
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{Date, PriceBar, PriceSeries};
///
/// let bar = |d: u32, close: f64| PriceBar {
///     date: Date::from_ymd_opt(2024, 1, d).unwrap(),
///     open: close,
///     high: close,
///     low: close,
///     close,
///     volume: 1_000.0,
/// };
/// let series = PriceSeries::new("SPY", vec![bar(3, 101.0), bar(2, 100.0)]);
/// assert_eq!(series.returns().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPriceSeries")]
pub struct PriceSeries {
    symbol: Symbol,
    bars: Vec<PriceBar>,
}

/// Wire form of [`PriceSeries`]; ordering is re-established on load.
#[derive(Deserialize)]
struct RawPriceSeries {
    symbol: Symbol,
    bars: Vec<PriceBar>,
}

impl From<RawPriceSeries> for PriceSeries {
    fn from(raw: RawPriceSeries) -> Self {
        Self::new(raw.symbol, raw.bars)
    }
}

impl PriceSeries {
    /// Build a series from bars in any order.
    ///
    /// Bars are sorted ascending by date. When a date repeats, the first
    /// bar supplied for it is kept.
    pub fn new(symbol: impl Into<Symbol>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        bars.dedup_by_key(|bar| bar.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// The symbol these prices belong to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The bars, ascending by date.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Number of trading days in the series.
    pub const fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns whether the series has no rows.
    pub const fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// First trading date, if any.
    pub fn first_date(&self) -> Option<Date> {
        self.bars.first().map(|bar| bar.date)
    }

    /// Last trading date, if any.
    pub fn last_date(&self) -> Option<Date> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Trading dates in order.
    pub fn dates(&self) -> Vec<Date> {
        self.bars.iter().map(|bar| bar.date).collect()
    }

    /// Close prices in order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Keep only the bars dated within `[start, end]`.
    #[must_use]
    pub fn within(self, start: Date, end: Date) -> Self {
        let bars = self
            .bars
            .into_iter()
            .filter(|bar| bar.date >= start && bar.date <= end)
            .collect();
        Self {
            symbol: self.symbol,
            bars,
        }
    }

    /// Close-to-close fractional returns, aligned with the bars.
    ///
    /// The first element is `0.0` since there is no prior close. A
    /// non-positive or non-finite prior close yields `NaN` for that period.
    pub fn returns(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.bars.len());
        let mut prev: Option<f64> = None;
        for bar in &self.bars {
            let ret = match prev {
                None => 0.0,
                Some(p) if p.is_finite() && p > 0.0 => bar.close / p - 1.0,
                Some(_) => f64::NAN,
            };
            out.push(ret);
            prev = Some(bar.close);
        }
        out
    }

    /// Convert to a DataFrame with `date`, `open`, `high`, `low`, `close`
    /// and `volume` columns.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let df = df! {
            "date" => self.dates(),
            "open" => self.bars.iter().map(|b| b.open).collect::<Vec<_>>(),
            "high" => self.bars.iter().map(|b| b.high).collect::<Vec<_>>(),
            "low" => self.bars.iter().map(|b| b.low).collect::<Vec<_>>(),
            "close" => self.closes(),
            "volume" => self.bars.iter().map(|b| b.volume).collect::<Vec<_>>(),
        }?;
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: Date::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 500.0,
        }
    }

    #[test]
    fn test_price_series_sorts_and_dedups() {
        let series = PriceSeries::new(
            "SPY",
            vec![bar(4, 103.0), bar(2, 100.0), bar(3, 101.0), bar(2, 99.0)],
        );

        assert_eq!(series.len(), 3);
        assert_eq!(series.symbol(), "SPY");
        assert_eq!(series.first_date(), Date::from_ymd_opt(2024, 1, 2));
        assert_eq!(series.last_date(), Date::from_ymd_opt(2024, 1, 4));
        assert_eq!(series.closes(), vec![100.0, 101.0, 103.0]);
    }

    #[test]
    fn test_price_series_deserialize_restores_order() {
        let json = r#"{"symbol": "SPY", "bars": [
            {"date": "2024-01-04", "open": 3.0, "high": 3.0, "low": 3.0, "close": 3.0, "volume": 0.0},
            {"date": "2024-01-02", "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0, "volume": 0.0},
            {"date": "2024-01-04", "open": 9.0, "high": 9.0, "low": 9.0, "close": 9.0, "volume": 0.0}
        ]}"#;
        let series: PriceSeries = serde_json::from_str(json).unwrap();

        assert_eq!(series.symbol(), "SPY");
        assert_eq!(series.closes(), vec![1.0, 3.0]);

        let round_trip: PriceSeries =
            serde_json::from_str(&serde_json::to_string(&series).unwrap()).unwrap();
        assert_eq!(round_trip, series);
    }

    #[test]
    fn test_price_series_returns() {
        let series = PriceSeries::new("SPY", vec![bar(2, 100.0), bar(3, 102.0), bar(4, 96.9)]);
        let returns = series.returns();

        assert_eq!(returns.len(), 3);
        assert_eq!(returns[0], 0.0);
        assert_relative_eq!(returns[1], 0.02, epsilon = 1e-12);
        assert_relative_eq!(returns[2], -0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_price_series_returns_zero_close() {
        let series = PriceSeries::new("X", vec![bar(2, 0.0), bar(3, 5.0)]);
        let returns = series.returns();
        assert!(returns[1].is_nan());
    }

    #[test]
    fn test_price_series_within() {
        let series = PriceSeries::new("SPY", vec![bar(2, 1.0), bar(3, 2.0), bar(4, 3.0)]);
        let trimmed = series.within(
            Date::from_ymd_opt(2024, 1, 3).unwrap(),
            Date::from_ymd_opt(2024, 1, 10).unwrap(),
        );
        assert_eq!(trimmed.closes(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_price_series_empty() {
        let series = PriceSeries::new("SPY", Vec::new());
        assert!(series.is_empty());
        assert!(series.returns().is_empty());
        assert_eq!(series.first_date(), None);
    }

    #[test]
    fn test_price_series_to_dataframe() {
        let series = PriceSeries::new("SPY", vec![bar(2, 100.0), bar(3, 101.0)]);
        let df = series.to_dataframe().unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 6);
        let closes: Vec<f64> = df
            .column("close")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(closes, vec![100.0, 101.0]);
    }
}
