//! Provider selection from the environment.

use std::{env, fmt, str::FromStr};

use crate::{FmpClient, Result, YahooClient, error::DataError};
use ronda_traits::{Date, PriceBar, PriceProvider};

/// Environment variable naming the provider.
pub const PROVIDER_ENV: &str = "RONDA_PROVIDER";

/// Environment variable holding the FMP API key.
pub const FMP_API_KEY_ENV: &str = "FMP_API_KEY";

/// Which market-data service to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Yahoo Finance chart API.
    #[default]
    Yahoo,
    /// Financial Modeling Prep.
    Fmp,
}

impl ProviderKind {
    /// Get the configuration value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Fmp => "fmp",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "fmp" => Ok(Self::Fmp),
            other => Err(DataError::UnknownProvider(other.to_string())),
        }
    }
}

/// Data-layer configuration.
#[derive(Clone, Default)]
pub struct DataConfig {
    /// Provider to query.
    pub provider: ProviderKind,
    /// FMP API key, required when `provider` is [`ProviderKind::Fmp`].
    pub fmp_api_key: Option<String>,
    /// Override for the provider base URL.
    pub base_url: Option<String>,
}

impl fmt::Debug for DataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataConfig")
            .field("provider", &self.provider)
            .field("fmp_api_key", &self.fmp_api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DataConfig {
    /// Read `RONDA_PROVIDER` and `FMP_API_KEY`, loading a `.env` file first
    /// if one is present.
    ///
    /// # Errors
    ///
    /// Returns an error if `RONDA_PROVIDER` names an unknown provider.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider value is unknown.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider = match lookup(PROVIDER_ENV) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => ProviderKind::default(),
        };
        Ok(Self {
            provider,
            fmp_api_key: lookup(FMP_API_KEY_ENV).filter(|k| !k.is_empty()),
            base_url: None,
        })
    }

    /// Build the configured provider.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingApiKey`] when FMP is selected without a
    /// key, or an error if the HTTP client cannot be built.
    pub fn build_provider(&self) -> Result<AnyProvider> {
        match self.provider {
            ProviderKind::Yahoo => {
                let client = match &self.base_url {
                    Some(url) => YahooClient::with_base_url(url.as_str())?,
                    None => YahooClient::new()?,
                };
                Ok(AnyProvider::Yahoo(client))
            }
            ProviderKind::Fmp => {
                let key = self.fmp_api_key.clone().ok_or(DataError::MissingApiKey)?;
                let client = match &self.base_url {
                    Some(url) => FmpClient::with_base_url(key, url.as_str()),
                    None => FmpClient::new(key),
                };
                Ok(AnyProvider::Fmp(client))
            }
        }
    }
}

/// Either supported provider, chosen at runtime.
#[derive(Debug, Clone)]
pub enum AnyProvider {
    /// Yahoo Finance.
    Yahoo(YahooClient),
    /// Financial Modeling Prep.
    Fmp(FmpClient),
}

impl PriceProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Yahoo(client) => client.name(),
            Self::Fmp(client) => client.name(),
        }
    }

    async fn daily_bars(
        &self,
        symbol: &str,
        start: Date,
        end: Date,
    ) -> ronda_traits::Result<Vec<PriceBar>> {
        match self {
            Self::Yahoo(client) => client.daily_bars(symbol, start, end).await,
            Self::Fmp(client) => client.daily_bars(symbol, start, end).await,
        }
    }
}
