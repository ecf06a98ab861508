//! User trade instructions typed at the console
//!
//! A command has the shape `ACTION SYMBOL AMOUNT`, e.g. `buy AAPL 10`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::Side;
use crate::values::Symbol;

/// Inputs that stop the input listener instead of being parsed
pub const EXIT_SENTINELS: [&str; 2] = ["q", "quit"];

/// Returns true if the (trimmed) input is one of the exit sentinels
pub fn is_exit_sentinel(raw: &str) -> bool {
    EXIT_SENTINELS.contains(&raw.trim())
}

/// Reasons a command is rejected, checked in this order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Exit requested")]
    ExitSentinel,

    #[error("Incorrect format: require ACTION TICKER AMOUNT")]
    Format,

    #[error("ACTION is not either 'buy' or 'sell'")]
    Action,

    #[error("AMOUNT not an integer")]
    NotInteger,

    #[error("AMOUNT is not positive")]
    NotPositive,
}

/// A validated user command
///
/// Immutable once built; the only constructor is [`Command::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    raw: String,
    side: Side,
    symbol: Symbol,
    amount: u64,
}

impl Command {
    /// Validate a raw console line
    ///
    /// Surrounding whitespace is trimmed, then the line is split on single spaces.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let line = raw.trim();
        if is_exit_sentinel(line) {
            return Err(ValidationError::ExitSentinel);
        }

        let tokens: Vec<&str> = line.split(' ').collect();
        let [action, symbol, amount] = tokens.as_slice() else {
            return Err(ValidationError::Format);
        };
        if symbol.is_empty() {
            return Err(ValidationError::Format);
        }

        let side = Side::from_action(action).ok_or(ValidationError::Action)?;
        let amount: i64 = amount.parse().map_err(|_| ValidationError::NotInteger)?;
        if amount <= 0 {
            return Err(ValidationError::NotPositive);
        }

        Ok(Self {
            raw: line.to_string(),
            side,
            symbol: symbol.to_string(),
            amount: amount as u64,
        })
    }

    /// Returns true if `raw` would be accepted by [`Command::parse`]
    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    /// The command text as entered (trimmed)
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of units, always > 0
    pub fn amount(&self) -> u64 {
        self.amount
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
