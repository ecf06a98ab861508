//! Default strategy attached to the trading loop

use std::collections::HashMap;

use gnat_core::{Bar, Fill, OrderRequest, Price, Symbol};
use gnat_ports::Strategy;
use log::{debug, info};

/// Tracks the watched symbols and their last close; never places orders
#[derive(Debug, Default)]
pub struct Watchlist {
    symbols: Vec<Symbol>,
    last_close: HashMap<Symbol, Price>,
    fills: usize,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn last_close(&self, symbol: &str) -> Option<Price> {
        self.last_close.get(symbol).copied()
    }

    pub fn fills(&self) -> usize {
        self.fills
    }
}

impl Strategy for Watchlist {
    fn name(&self) -> &str {
        "watchlist"
    }

    fn set_symbols(&mut self, symbols: &[Symbol]) {
        info!("Watching {} symbols: {}", symbols.len(), symbols.join(", "));
        self.symbols = symbols.to_vec();
    }

    fn on_bars(&mut self, bars: &[Bar]) -> Vec<OrderRequest> {
        for bar in bars {
            self.last_close.insert(bar.symbol.clone(), bar.close);
        }
        Vec::new()
    }

    fn on_fill(&mut self, fill: &Fill) {
        debug!("Watchlist saw fill {} {}", fill.side, fill.symbol);
        self.fills += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_records_closes_and_never_orders() {
        let mut watchlist = Watchlist::new();
        watchlist.set_symbols(&["AAPL".to_string(), "@DOGE".to_string()]);
        assert_eq!(watchlist.symbols().len(), 2);

        let bar = Bar {
            symbol: "AAPL".to_string(),
            timestamp: Utc::now(),
            open: dec!(1),
            high: dec!(2),
            low: dec!(1),
            close: dec!(2),
            volume: dec!(100),
        };
        assert!(watchlist.on_bars(&[bar]).is_empty());
        assert_eq!(watchlist.last_close("AAPL"), Some(dec!(2)));
        assert_eq!(watchlist.last_close("@DOGE"), None);
    }
}
