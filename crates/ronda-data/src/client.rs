//! FMP API client implementation.

use crate::{Result, error::DataError, types::HistoricalPrice};
use chrono::NaiveDate;
use reqwest::Client;
use ronda_traits::{Date, PriceBar, PriceProvider};
use tracing::debug;

/// Base URL for the FMP stable API.
pub const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, FMP_BASE_URL)
    }

    /// Create a client against a different base URL (a proxy or a test server).
    #[must_use]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        let sep = if endpoint.contains('?') { '&' } else { '?' };
        format!("{}/{endpoint}{sep}apikey={}", self.base_url, self.api_key)
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        debug!(endpoint, "fmp request");
        let response = self.client.get(self.url(endpoint)).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimitExceeded("fmp"));
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Api {
                provider: "fmp",
                message: format!("HTTP {status}: {text}"),
            });
        }

        let text = response.text().await?;

        // Error payloads come back with a 200 status
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(DataError::Api {
                provider: "fmp",
                message: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get historical daily prices for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `from` - First date, inclusive
    /// * `to` - Last date, inclusive
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HistoricalPrice>> {
        let endpoint = format!(
            "historical-price-eod/full?symbol={}&from={}&to={}",
            symbol.to_uppercase(),
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d"),
        );
        // The stable API returns a flat array, most recent first
        self.get(&endpoint).await
    }
}

impl PriceProvider for FmpClient {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn daily_bars(
        &self,
        symbol: &str,
        start: Date,
        end: Date,
    ) -> ronda_traits::Result<Vec<PriceBar>> {
        let prices = self.historical_prices(symbol, start, end).await?;
        Ok(prices.iter().filter_map(HistoricalPrice::to_bar).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = FmpClient::new("test_key");
        assert_eq!(
            client.url("quote?symbol=AAPL"),
            "https://financialmodelingprep.com/stable/quote?symbol=AAPL&apikey=test_key"
        );
        assert_eq!(
            client.url("historical-price-eod/full"),
            "https://financialmodelingprep.com/stable/historical-price-eod/full?apikey=test_key"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = FmpClient::with_base_url("k", "http://localhost:8080/");
        assert_eq!(client.url("x?a=1"), "http://localhost:8080/x?a=1&apikey=k");
    }
}
