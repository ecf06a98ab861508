use gnat_core::{Bar, Fill, OrderRequest, Symbol};

/// Strategy trait - the algorithm attached to the trading loop
pub trait Strategy: Send {
    /// Strategy name for logging
    fn name(&self) -> &str;

    /// Called once when attached, with the tracked symbols
    fn set_symbols(&mut self, symbols: &[Symbol]);

    /// Called every cycle with the freshly fetched bars
    fn on_bars(&mut self, _bars: &[Bar]) -> Vec<OrderRequest> {
        Vec::new()
    }

    /// Called for every fill, whether the order came from the strategy or the user (optional)
    fn on_fill(&mut self, _fill: &Fill) {}
}
