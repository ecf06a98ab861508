use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - uses Decimal for precision
pub type Quantity = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Symbol identifier for a tradeable instrument
///
/// Opaque to the orchestration layer. An `@` prefix marks a crypto asset.
pub type Symbol = String;

/// Asset class derived from the symbol notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    Equity,
    Crypto,
}

impl AssetClass {
    /// Prefix that marks a crypto symbol (e.g. `@DOGE`)
    pub const CRYPTO_PREFIX: char = '@';

    pub fn of(symbol: &str) -> Self {
        if symbol.starts_with(Self::CRYPTO_PREFIX) {
            AssetClass::Crypto
        } else {
            AssetClass::Equity
        }
    }

    /// Symbol without the asset class marker
    pub fn base(symbol: &str) -> &str {
        symbol.strip_prefix(Self::CRYPTO_PREFIX).unwrap_or(symbol)
    }
}

/// Parse a comma-separated asset list (`"AAPL, @DOGE"`) into symbols
///
/// Entries are trimmed; empty entries are dropped.
pub fn parse_symbol_list(raw: &str) -> Vec<Symbol> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
