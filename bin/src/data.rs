//! Data loading utilities for the ronda CLI.

use chrono::NaiveDate;
use ronda_data::{DataConfig, DataFetcher};
use ronda_traits::{PriceSeries, RondaError};

/// Validated fetch arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl Window {
    /// Parse `start` and `end`, rejecting an inverted range.
    pub(crate) fn parse(start: &str, end: &str) -> Result<Self, RondaError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        if start > end {
            return Err(RondaError::InvalidInput(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }
}

/// Load daily prices for `symbol` from the configured provider.
///
/// The provider comes from `RONDA_PROVIDER` (Yahoo Finance by default).
/// `Ok(None)` means the provider was reached but nothing usable came back;
/// the reason has already been logged.
pub(crate) async fn load_prices(
    symbol: &str,
    window: Window,
) -> Result<Option<PriceSeries>, RondaError> {
    if symbol.trim().is_empty() {
        return Err(RondaError::InvalidInput("symbol is empty".to_string()));
    }
    let provider = DataConfig::from_env()?.build_provider()?;
    let fetcher = DataFetcher::new(provider);
    Ok(fetcher.fetch(symbol, window.start, window.end).await)
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate, RondaError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| RondaError::InvalidDate(format!("Invalid date format '{}': {}", date_str, e)))
}
