//! Error types for the market-data clients.

use ronda_traits::RondaError;
use thiserror::Error;

/// Errors that can occur when requesting prices from a provider.
#[derive(Debug, Error)]
pub enum DataError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// Unknown provider name in configuration.
    #[error("Unknown data provider '{0}' (expected 'yahoo' or 'fmp')")]
    UnknownProvider(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider returned an error.
    #[error("{provider} API error: {message}")]
    Api {
        /// Provider name.
        provider: &'static str,
        /// Error detail from the response.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded for {0}")]
    RateLimitExceeded(&'static str),

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
}

impl From<DataError> for RondaError {
    fn from(err: DataError) -> Self {
        Self::DataFetch(err.to_string())
    }
}
