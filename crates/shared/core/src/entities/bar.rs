use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Price, Symbol, Timestamp};

/// OHLCV bar for a single symbol and period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: Symbol,
    /// Start of the bar period
    pub timestamp: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Decimal,
}

impl Bar {
    /// Absolute change over the bar
    pub fn change(&self) -> Decimal {
        self.close - self.open
    }

    /// Percentage change over the bar (None if open is zero)
    pub fn change_pct(&self) -> Option<Decimal> {
        if self.open.is_zero() {
            return None;
        }
        Some(self.change() / self.open * Decimal::ONE_HUNDRED)
    }
}
