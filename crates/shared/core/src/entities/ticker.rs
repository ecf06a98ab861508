use serde::{Deserialize, Serialize};

use super::Bar;
use crate::values::Timestamp;

/// Latest observed state of one instrument, as shown on the ticker board
///
/// Owned by the trading loop; the orchestration layer only stores and copies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerState {
    /// Most recent bar from the streamer
    pub last_bar: Bar,
    /// Number of bars observed for this symbol since start
    pub bars_seen: u64,
    /// Wall-clock time of the last update
    pub updated_at: Timestamp,
}

impl TickerState {
    pub fn new(bar: Bar, updated_at: Timestamp) -> Self {
        Self {
            last_bar: bar,
            bars_seen: 1,
            updated_at,
        }
    }

    /// Fold a newer bar into this state
    pub fn observe(&mut self, bar: Bar, updated_at: Timestamp) {
        self.last_bar = bar;
        self.bars_seen += 1;
        self.updated_at = updated_at;
    }
}
