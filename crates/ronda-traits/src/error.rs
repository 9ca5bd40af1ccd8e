//! Error types for the ronda toolkit.
//!
//! Covers invalid caller input, missing or unfetchable market data, and
//! failures from the dataframe and I/O layers.

use thiserror::Error;

/// The main error type for ronda operations.
#[derive(Debug, Error)]
pub enum RondaError {
    /// Caller supplied input that violates a precondition.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Signal and return series do not have the same length.
    #[error("Length mismatch: {signals} signals vs {returns} returns")]
    LengthMismatch {
        /// Number of signal observations.
        signals: usize,
        /// Number of return observations.
        returns: usize,
    },

    /// A signal value outside of {-1, 0, 1}.
    #[error("Invalid signal value {0}: expected -1, 0 or 1")]
    InvalidSignal(f64),

    /// The provider answered but returned no rows.
    #[error("No data for {0}")]
    NoData(String),

    /// The provider request itself failed.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// A date is out of range or could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RondaError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RondaError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for ronda operations.
pub type Result<T> = std::result::Result<T, RondaError>;
