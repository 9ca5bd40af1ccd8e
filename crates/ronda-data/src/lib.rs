//! Historical daily price fetching for ronda.
//!
//! Two providers are supported:
//!
//! - **Yahoo Finance** (default): public chart API, no key needed
//! - **Financial Modeling Prep**: requires `FMP_API_KEY`
//!
//! The provider is chosen with `RONDA_PROVIDER` (`yahoo` or `fmp`). Both
//! variables may also come from a `.env` file.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ronda_data::{DataConfig, DataFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DataConfig::from_env()?.build_provider()?;
//!     let fetcher = DataFetcher::new(provider);
//!
//!     if let Some(prices) = fetcher.fetch("SPY", start, end).await {
//!         println!("{} bars", prices.len());
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod fetch;
mod types;
mod yahoo;

pub use client::{FMP_BASE_URL, FmpClient};
pub use config::{AnyProvider, DataConfig, FMP_API_KEY_ENV, PROVIDER_ENV, ProviderKind};
pub use error::DataError;
pub use fetch::DataFetcher;
pub use types::HistoricalPrice;
pub use yahoo::{YAHOO_BASE_URL, YahooClient};

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, DataError>;
