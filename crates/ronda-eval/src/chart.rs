//! Text charts for backtest results.
//!
//! The engine hands a finished [`PerformanceTable`] to a [`ChartRenderer`].
//! [`TerminalChart`] draws the cumulative-return and drawdown curves as
//! line charts on stdout; [`NoopRenderer`] draws nothing, for headless runs.

use std::fmt;
use std::io::{self, Write};

use ronda_traits::Result;

use crate::backtest::PerformanceTable;

/// Draws the charts for a backtest.
pub trait ChartRenderer: fmt::Debug + Send + Sync {
    /// Render charts for `table`. Errors are reported to the caller but never
    /// change the computed statistics.
    fn render(&self, table: &PerformanceTable) -> Result<()>;
}

/// Renderer that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl ChartRenderer for NoopRenderer {
    fn render(&self, _table: &PerformanceTable) -> Result<()> {
        Ok(())
    }
}

/// One titled line chart.
#[derive(Debug, Clone, Copy)]
pub struct LineChart<'a> {
    /// Chart title.
    pub title: &'a str,
    /// Y-axis label.
    pub y_label: &'a str,
    /// Legend entry for the plotted series.
    pub legend: &'a str,
    /// Marker drawn for each point.
    pub marker: char,
    /// Values to plot, one per period.
    pub values: &'a [f64],
}

impl LineChart<'_> {
    /// Draw the chart into a `width` x `height` plot area.
    ///
    /// Long series are sampled down to `width` columns. Grid lines run every
    /// fourth row.
    pub fn draw(&self, width: usize, height: usize) -> String {
        let width = width.max(2);
        let height = height.max(2);
        let mut lines = vec![
            self.title.to_string(),
            "=".repeat(self.title.chars().count()),
            self.y_label.to_string(),
        ];

        let finite: Vec<f64> = self.values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            lines.push("(no data)".to_string());
            return join_lines(&lines);
        }

        let max_val = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_val = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let (lo, hi) = if (max_val - min_val).abs() > 1e-12 {
            (min_val, max_val)
        } else {
            (min_val - 0.5, max_val + 0.5)
        };
        let range = hi - lo;

        let n = self.values.len();
        let columns = width.min(n);
        let mut grid = vec![vec![' '; columns]; height];
        for (r, row) in grid.iter_mut().enumerate() {
            if r % 4 == 0 {
                row.iter_mut().for_each(|c| *c = '·');
            }
        }

        for column in 0..columns {
            let idx = if columns > 1 {
                column * (n - 1) / (columns - 1)
            } else {
                0
            };
            let v = self.values[idx];
            if !v.is_finite() {
                continue;
            }
            let row = ((hi - v) / range * (height - 1) as f64).round() as usize;
            grid[row.min(height - 1)][column] = self.marker;
        }

        let mid = (height - 1) / 2;
        for (r, row) in grid.iter().enumerate() {
            let label = if r == 0 || r == mid || r == height - 1 {
                let y = hi - range * r as f64 / (height - 1) as f64;
                format!("{y:>10.4}")
            } else {
                " ".repeat(10)
            };
            let line: String = row.iter().collect();
            lines.push(format!("{label} │{}", line.trim_end()));
        }
        lines.push(format!("{} └{}", " ".repeat(10), "─".repeat(columns)));
        lines.push(format!("{} period 0..{}", " ".repeat(11), n - 1));
        lines.push(format!("{} {} {}", " ".repeat(11), self.marker, self.legend));
        join_lines(&lines)
    }
}

/// Newline-terminated text block.
fn join_lines(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Draws cumulative returns and drawdown as text charts on stdout.
#[derive(Debug, Clone, Copy)]
pub struct TerminalChart {
    /// Plot area width in columns.
    pub width: usize,
    /// Plot area height in rows.
    pub height: usize,
}

impl Default for TerminalChart {
    fn default() -> Self {
        Self {
            width: 72,
            height: 16,
        }
    }
}

impl TerminalChart {
    /// Create a renderer with the given plot area.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Draw both charts into a string.
    pub fn draw(&self, table: &PerformanceTable) -> String {
        let drawdown_pct: Vec<f64> = table.drawdown.iter().map(|d| d * 100.0).collect();

        let cumulative = LineChart {
            title: "Cumulative Returns",
            y_label: "Cumulative Value",
            legend: "Cumulative Returns",
            marker: '*',
            values: &table.cumulative_returns,
        };
        let drawdown = LineChart {
            title: "Drawdown",
            y_label: "Drawdown (%)",
            legend: "Drawdown",
            marker: '#',
            values: &drawdown_pct,
        };

        format!(
            "{}\n{}",
            cumulative.draw(self.width, self.height),
            drawdown.draw(self.width, self.height)
        )
    }

    /// Write both charts to `writer`.
    pub fn render_to<W: Write>(&self, table: &PerformanceTable, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.draw(table).as_bytes())?;
        writer.flush()
    }
}

impl ChartRenderer for TerminalChart {
    fn render(&self, table: &PerformanceTable) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.render_to(table, &mut handle)?;
        Ok(())
    }
}
