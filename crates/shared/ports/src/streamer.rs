use gnat_core::{Bar, Price, Symbol};

use crate::error::ConnectorResult;

/// Port for market data sources
///
/// Implementations may block on network I/O. Callers must not hold any
/// shared lock while calling into a streamer.
pub trait Streamer: Send + Sync {
    /// Connector name for logging
    fn name(&self) -> &str;

    /// Fetch the most recent bar for one symbol
    fn latest_bar(&self, symbol: &str) -> ConnectorResult<Bar>;

    /// Fetch the most recent bar for every symbol, failing on the first error
    fn latest_bars(&self, symbols: &[Symbol]) -> ConnectorResult<Vec<Bar>> {
        symbols.iter().map(|s| self.latest_bar(s)).collect()
    }

    /// Current price for `symbol` without moving the feed forward
    ///
    /// Sources whose `latest_bar` has side effects override this.
    fn last_price(&self, symbol: &str) -> ConnectorResult<Price> {
        Ok(self.latest_bar(symbol)?.close)
    }
}
