//! Data types for provider responses.

use chrono::NaiveDate;
use ronda_traits::PriceBar;
use serde::{Deserialize, Serialize};

/// Historical daily price row from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date (YYYY-MM-DD).
    pub date: String,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Convert to a [`PriceBar`]; `None` when the date does not parse.
    #[must_use]
    pub fn to_bar(&self) -> Option<PriceBar> {
        Some(PriceBar {
            date: self.parsed_date()?,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        })
    }
}
