//! Fetch command implementation.

use crate::data::{self, Window};
use anyhow::Result;
use ronda_traits::PriceSeries;

/// Fetch and print daily bars for a symbol.
pub(crate) async fn run_fetch(symbol: &str, start: &str, end: &str, format: &str) -> Result<()> {
    let window = Window::parse(start, end)?;

    let Some(prices) = data::load_prices(symbol, window).await? else {
        println!(
            "No price data for {} between {} and {}",
            symbol.to_uppercase(),
            window.start,
            window.end
        );
        return Ok(());
    };

    if format == "json" {
        let json = serde_json::to_string_pretty(&prices)
            .map_err(|e| anyhow::anyhow!("JSON serialization error: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_table(&prices));
    }

    Ok(())
}

fn format_table(prices: &PriceSeries) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({} bars)\n\n",
        prices.symbol(),
        prices.len()
    ));
    out.push_str(&format!(
        "{:<12} {:>12} {:>12} {:>12} {:>12} {:>16}\n",
        "Date", "Open", "High", "Low", "Close", "Volume"
    ));
    out.push_str(&format!("{}\n", "-".repeat(81)));
    for bar in prices.bars() {
        out.push_str(&format!(
            "{:<12} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>16.0}\n",
            bar.date.format("%Y-%m-%d"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda_traits::{Date, PriceBar};

    #[test]
    fn test_format_table() {
        let bar = PriceBar {
            date: Date::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 472.16,
            high: 473.67,
            low: 470.49,
            close: 472.65,
            volume: 123_623_700.0,
        };
        let text = format_table(&PriceSeries::new("SPY", vec![bar]));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "SPY (1 bars)");
        assert!(lines[2].starts_with("Date"));
        assert!(lines[4].starts_with("2024-01-02"));
        assert!(lines[4].contains("472.65"));
        assert!(lines[4].ends_with("123623700"));
    }
}
