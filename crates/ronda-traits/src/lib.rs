#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the ronda backtesting toolkit.
//!
//! This crate provides the shared vocabulary used by the engine and the data
//! layer: price series, positions and signal series, the provider seam, and
//! the error type.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod provider;
pub mod signal;
pub mod types;

// Re-exports
pub use error::{Result, RondaError};
pub use provider::PriceProvider;
pub use signal::{Position, SignalSeries};
pub use types::{Date, PriceBar, PriceSeries, Symbol};
