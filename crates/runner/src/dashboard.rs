//! Console dashboard renderer

use std::time::Duration;

use gnat_core::TickerState;
use log::info;

use crate::display::Renderer;
use crate::shutdown::ShutdownSignal;
use crate::ticker_board::TickerBoard;

pub const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

/// Logs one line per symbol on every refresh until shutdown
#[derive(Debug, Clone)]
pub struct ConsoleDashboard {
    refresh: Duration,
}

impl ConsoleDashboard {
    pub fn new() -> Self {
        Self {
            refresh: DEFAULT_REFRESH,
        }
    }

    pub fn with_refresh(mut self, refresh: Duration) -> Self {
        self.refresh = refresh;
        self
    }

    /// Format one board row
    pub fn format_row(symbol: &str, state: &TickerState) -> String {
        let bar = &state.last_bar;
        let change = bar
            .change_pct()
            .map(|pct| format!("{:+.2}%", pct))
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "{:<10} close={} change={} high={} low={} volume={} bars={} at={}",
            symbol,
            bar.close,
            change,
            bar.high,
            bar.low,
            bar.volume,
            state.bars_seen,
            bar.timestamp.format("%Y-%m-%d %H:%M")
        )
    }
}

impl Default for ConsoleDashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ConsoleDashboard {
    fn render(&mut self, board: TickerBoard, shutdown: ShutdownSignal) {
        info!("Dashboard refreshing every {:?}", self.refresh);
        loop {
            // snapshot releases the board lock before formatting
            for (symbol, state) in board.snapshot() {
                info!("{}", Self::format_row(&symbol, &state));
            }
            if shutdown.wait(self.refresh) {
                break;
            }
        }
        info!("Dashboard stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gnat_core::Bar;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_row() {
        let bar = Bar {
            symbol: "AAPL".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 15, 30, 0).unwrap(),
            open: dec!(100),
            high: dec!(103),
            low: dec!(99),
            close: dec!(102),
            volume: dec!(5000),
        };
        let state = TickerState::new(bar, Utc::now());
        let row = ConsoleDashboard::format_row("AAPL", &state);
        assert!(row.starts_with("AAPL "));
        assert!(row.contains("close=102"));
        assert!(row.contains("2.00%"));
        assert!(row.contains("bars=1"));
        assert!(row.contains("at=2024-01-02 15:30"));
    }

    #[test]
    fn test_render_returns_on_shutdown() {
        let board = TickerBoard::new();
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();
        ConsoleDashboard::new().render(board, shutdown);
    }
}
