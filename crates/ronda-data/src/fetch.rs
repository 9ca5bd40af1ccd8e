//! Single-attempt price fetching with reported, non-fatal failures.

use ronda_traits::{Date, PriceProvider, PriceSeries, Result, RondaError};
use tracing::{debug, warn};

/// Fetches a daily price series from a [`PriceProvider`].
///
/// One request per call: no retries, no caching, no backoff.
///
/// # Example
///
/// ```rust,ignore
/// use ronda_data::{DataFetcher, YahooClient};
///
/// let fetcher = DataFetcher::new(YahooClient::new()?);
/// if let Some(prices) = fetcher.fetch("SPY", start, end).await {
///     let returns = prices.returns();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DataFetcher<P> {
    provider: P,
}

impl<P: PriceProvider> DataFetcher<P> {
    /// Wrap a provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch daily bars for `symbol` within `[start, end]`.
    ///
    /// Returns `None` when the provider has no rows for the window, when the
    /// request fails, or when the arguments are invalid. Each case is logged
    /// as a warning; none of them is an error for the caller.
    pub async fn fetch(&self, symbol: &str, start: Date, end: Date) -> Option<PriceSeries> {
        match self.try_fetch(symbol, start, end).await {
            Ok(series) => Some(series),
            Err(RondaError::NoData(_)) => {
                warn!(symbol, %start, %end, provider = self.provider.name(), "No data for {symbol}");
                None
            }
            Err(e) => {
                warn!(
                    symbol,
                    provider = self.provider.name(),
                    error = %e,
                    "Error fetching data for {symbol}"
                );
                None
            }
        }
    }

    /// Fetch daily bars, reporting why nothing came back.
    ///
    /// Bars are sorted ascending, de-duplicated by date, and trimmed to
    /// `[start, end]`.
    ///
    /// # Errors
    ///
    /// - [`RondaError::InvalidInput`] for an empty symbol or `start > end`
    /// - [`RondaError::NoData`] when the window holds no bars
    /// - [`RondaError::DataFetch`] when the provider request fails
    pub async fn try_fetch(&self, symbol: &str, start: Date, end: Date) -> Result<PriceSeries> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(RondaError::InvalidInput("symbol is empty".to_string()));
        }
        if start > end {
            return Err(RondaError::InvalidInput(format!(
                "start date {start} is after end date {end}"
            )));
        }

        let bars = self.provider.daily_bars(symbol, start, end).await?;
        let series = PriceSeries::new(symbol.to_uppercase(), bars).within(start, end);

        if series.is_empty() {
            return Err(RondaError::NoData(symbol.to_string()));
        }

        debug!(
            symbol,
            provider = self.provider.name(),
            rows = series.len(),
            "fetched daily bars"
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda_traits::PriceBar;
    use std::sync::Mutex;

    /// Provider returning canned results and counting calls.
    #[derive(Debug)]
    struct Canned {
        bars: Option<Vec<PriceBar>>,
        calls: Mutex<usize>,
    }

    impl Canned {
        fn new(bars: Option<Vec<PriceBar>>) -> Self {
            Self {
                bars,
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl PriceProvider for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn daily_bars(&self, _symbol: &str, _start: Date, _end: Date) -> Result<Vec<PriceBar>> {
            *self.calls.lock().unwrap() += 1;
            self.bars
                .clone()
                .ok_or_else(|| RondaError::DataFetch("connection refused".to_string()))
        }
    }

    fn date(d: u32) -> Date {
        Date::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn bar(d: u32, close: f64) -> PriceBar {
        PriceBar {
            date: date(d),
            open: close,
            high: close,
            low: close,
            close,
            volume: 10.0,
        }
    }

    #[tokio::test]
    async fn test_fetch_sorts_and_trims() {
        let fetcher = DataFetcher::new(Canned::new(Some(vec![
            bar(6, 103.0),
            bar(4, 101.0),
            bar(1, 99.0),
            bar(5, 102.0),
        ])));
        let series = fetcher.fetch("spy", date(4), date(5)).await.unwrap();

        assert_eq!(series.symbol(), "SPY");
        assert_eq!(series.closes(), vec![101.0, 102.0]);
        assert_eq!(fetcher.provider().calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_no_data_is_absent() {
        let fetcher = DataFetcher::new(Canned::new(Some(Vec::new())));
        assert!(fetcher.fetch("SPY", date(1), date(5)).await.is_none());

        let err = fetcher.try_fetch("SPY", date(1), date(5)).await.unwrap_err();
        assert!(matches!(err, RondaError::NoData(s) if s == "SPY"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_absent_single_attempt() {
        let fetcher = DataFetcher::new(Canned::new(None));
        assert!(fetcher.fetch("SPY", date(1), date(5)).await.is_none());
        assert_eq!(fetcher.provider().calls(), 1);

        let err = fetcher.try_fetch("SPY", date(1), date(5)).await.unwrap_err();
        assert!(matches!(err, RondaError::DataFetch(_)));
    }

    #[tokio::test]
    async fn test_fetch_rejects_bad_arguments_without_request() {
        let fetcher = DataFetcher::new(Canned::new(Some(vec![bar(2, 1.0)])));

        assert!(fetcher.fetch("  ", date(1), date(5)).await.is_none());
        assert!(matches!(
            fetcher.try_fetch("SPY", date(5), date(1)).await,
            Err(RondaError::InvalidInput(_))
        ));
        assert_eq!(fetcher.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_same_day_window() {
        let fetcher = DataFetcher::new(Canned::new(Some(vec![bar(2, 1.0), bar(3, 2.0)])));
        let series = fetcher.fetch("SPY", date(3), date(3)).await.unwrap();
        assert_eq!(series.len(), 1);
    }
}
