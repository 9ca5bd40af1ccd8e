//! Yahoo Finance chart API client.
//!
//! Fetches daily OHLCV bars from the public v8 chart endpoint. No API key
//! is needed.

use crate::{Result, error::DataError};
use chrono::{DateTime, NaiveDate, NaiveTime};
use reqwest::{Client, StatusCode};
use ronda_traits::{Date, PriceBar, PriceProvider};
use serde::Deserialize;
use tracing::debug;

/// Base URL for the Yahoo Finance query API.
pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Yahoo Finance client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    /// Create a client against the public Yahoo endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_base_url(YAHOO_BASE_URL)
    }

    /// Create a client against a different base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent("Mozilla/5.0").build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        // Bars carry the exchange's local date, which can be a day ahead of
        // UTC; start a day early and trim afterwards. period2 is exclusive.
        let period1 = start
            .pred_opt()
            .unwrap_or(start)
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();
        let period2 = end
            .succ_opt()
            .unwrap_or(end)
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();
        format!(
            "{}/v8/finance/chart/{}?interval=1d&period1={period1}&period2={period2}",
            self.base_url,
            symbol.to_uppercase()
        )
    }

    /// Fetch daily bars between `start` and `end`, both inclusive.
    ///
    /// Rows with any missing OHLCV field are skipped. An empty window is
    /// `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the symbol is unknown, or the
    /// response carries a chart error.
    pub async fn daily(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<PriceBar>> {
        let url = self.url(symbol, start, end);
        debug!(%url, "yahoo request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimitExceeded("yahoo"));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_uppercase()));
        }

        let text = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ChartResponse>(&text)
                .ok()
                .and_then(|r| r.chart.error)
                .map_or_else(
                    || format!("HTTP {status}: {text}"),
                    |e| format!("HTTP {status}: {} - {}", e.code, e.description),
                );
            return Err(DataError::Api {
                provider: "yahoo",
                message,
            });
        }

        let parsed: ChartResponse = serde_json::from_str(&text)?;
        if let Some(error) = parsed.chart.error {
            return Err(DataError::Api {
                provider: "yahoo",
                message: format!("{} - {}", error.code, error.description),
            });
        }

        let Some(data) = parsed.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(Vec::new());
        };

        Ok(to_bars(data)
            .into_iter()
            .filter(|bar| (start..=end).contains(&bar.date))
            .collect())
    }
}

fn to_bars(data: ChartData) -> Vec<PriceBar> {
    let offset = data.meta.map_or(0, |m| m.gmtoffset);
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let at = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();

    data.timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
            Some(PriceBar {
                date,
                open: at(&quote.open, i)?,
                high: at(&quote.high, i)?,
                low: at(&quote.low, i)?,
                close: at(&quote.close, i)?,
                volume: at(&quote.volume, i)?,
            })
        })
        .collect()
}

impl PriceProvider for YahooClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn daily_bars(
        &self,
        symbol: &str,
        start: Date,
        end: Date,
    ) -> ronda_traits::Result<Vec<PriceBar>> {
        Ok(self.daily(symbol, start, end).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_url_end_is_inclusive() {
        let client = YahooClient::with_base_url("http://localhost/").unwrap();
        let url = client.url("spy", date(2024, 1, 2), date(2024, 1, 5));
        // 2024-01-01T00:00Z and 2024-01-06T00:00Z
        assert_eq!(
            url,
            "http://localhost/v8/finance/chart/SPY?interval=1d&period1=1704067200&period2=1704499200"
        );
    }

    #[test]
    fn test_to_bars_skips_incomplete_rows() {
        let json = r#"{
            "meta": {"gmtoffset": -18000},
            "timestamp": [1704205800, 1704292200, 1704378600],
            "indicators": {"quote": [{
                "open":   [472.16, null, 470.0],
                "high":   [473.67, 470.0, 471.0],
                "low":    [470.49, 466.0, 468.0],
                "close":  [472.65, 468.79, 467.28],
                "volume": [123623700, 103585900, 84232200]
            }]}
        }"#;
        let data: ChartData = serde_json::from_str(json).unwrap();
        let bars = to_bars(data);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, date(2024, 1, 2));
        assert_eq!(bars[0].close, 472.65);
        assert_eq!(bars[1].date, date(2024, 1, 4));
        assert_eq!(bars[1].volume, 84_232_200.0);
    }

    #[test]
    fn test_to_bars_uses_exchange_date() {
        // NZX open on 2024-01-02 local time (+13:00) is 2024-01-01T21:00Z
        let json = r#"{
            "meta": {"gmtoffset": 46800},
            "timestamp": [1704142800],
            "indicators": {"quote": [{
                "open": [1.0], "high": [1.0], "low": [1.0], "close": [1.0], "volume": [10]
            }]}
        }"#;
        let data: ChartData = serde_json::from_str(json).unwrap();
        let bars = to_bars(data);
        assert_eq!(bars[0].date, date(2024, 1, 2));

        let client = YahooClient::with_base_url("http://localhost").unwrap();
        let url = client.url("FPH.NZ", date(2024, 1, 2), date(2024, 1, 2));
        // the day before start, so the 21:00Z bar is requested
        assert!(url.contains("period1=1704067200"));
    }

    #[test]
    fn test_to_bars_without_timestamps() {
        let json = r#"{"meta": {}, "indicators": {"quote": [{}]}}"#;
        let data: ChartData = serde_json::from_str(json).unwrap();
        assert!(to_bars(data).is_empty());
    }
}
