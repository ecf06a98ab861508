//! Latest state per tracked symbol
//!
//! Written by the trading loop, read by the display. Entries are never
//! removed; traversals happen under the lock via [`TickerBoard::snapshot`]
//! or [`TickerBoard::with_entries`].

use std::collections::HashMap;
use std::sync::Arc;

use gnat_core::{Bar, Symbol, TickerState, Timestamp};
use parking_lot::Mutex;

#[derive(Clone, Default)]
pub struct TickerBoard {
    inner: Arc<Mutex<HashMap<Symbol, TickerState>>>,
}

impl TickerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update the entry for the bar's symbol
    pub fn upsert(&self, bar: Bar, at: Timestamp) {
        let mut entries = self.inner.lock();
        match entries.get_mut(&bar.symbol) {
            Some(state) => state.observe(bar, at),
            None => {
                entries.insert(bar.symbol.clone(), TickerState::new(bar, at));
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<TickerState> {
        self.inner.lock().get(symbol).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Copy of every entry, sorted by symbol
    pub fn snapshot(&self) -> Vec<(Symbol, TickerState)> {
        let mut entries: Vec<_> = self
            .inner
            .lock()
            .iter()
            .map(|(symbol, state)| (symbol.clone(), state.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Run `f` over the entries with the lock held. `f` must not block.
    pub fn with_entries<R>(&self, f: impl FnOnce(&HashMap<Symbol, TickerState>) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl std::fmt::Debug for TickerBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickerBoard")
            .field("len", &self.len())
            .finish()
    }
}
