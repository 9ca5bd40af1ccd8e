//! Market-data provider trait.
//!
//! This module defines the `PriceProvider` trait, the seam between the data
//! fetcher and whichever remote service serves daily bars.

use std::future::Future;

use crate::{Date, PriceBar, Result};

/// A remote source of daily OHLCV bars.
///
/// Implementations perform a single request per call. They report an empty
/// window as `Ok(vec![])` and reserve `Err` for failed requests, so callers
/// can tell "no data" apart from "fetch failure".
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{Date, PriceBar, PriceProvider, Result};
///
/// struct Fixed(Vec<PriceBar>);
///
/// impl PriceProvider for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     async fn daily_bars(&self, _symbol: &str, _start: Date, _end: Date) -> Result<Vec<PriceBar>> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait PriceProvider: Send + Sync {
    /// Short provider name used in diagnostics.
    fn name(&self) -> &str;

    /// Fetch daily bars for `symbol` dated within `[start, end]`.
    ///
    /// Bars may come back in any order; the fetcher sorts them.
    fn daily_bars(
        &self,
        symbol: &str,
        start: Date,
        end: Date,
    ) -> impl Future<Output = Result<Vec<PriceBar>>> + Send;
}
