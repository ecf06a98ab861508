use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Command, Side};
use crate::values::{Price, Quantity, Symbol, Timestamp};

/// Market order handed to a broker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Client-assigned order ID for correlation
    pub client_order_id: Uuid,
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: Quantity,
    pub created_at: Timestamp,
}

impl OrderRequest {
    pub fn market(symbol: impl Into<Symbol>, side: Side, quantity: Quantity) -> Self {
        Self {
            client_order_id: Uuid::new_v4(),
            symbol: symbol.into(),
            side,
            quantity,
            created_at: Utc::now(),
        }
    }
}

impl From<&Command> for OrderRequest {
    fn from(cmd: &Command) -> Self {
        OrderRequest::market(cmd.symbol(), cmd.side(), Decimal::from(cmd.amount()))
    }
}

/// Execution report returned by a broker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub client_order_id: Uuid,
    /// Broker-side identifier, if the broker assigns one
    pub broker_order_id: Option<String>,
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: Quantity,
    /// Average fill price; None when the broker accepted without an immediate fill
    pub price: Option<Price>,
    pub filled_at: Timestamp,
}

impl Fill {
    /// Notional value of the fill, if priced
    pub fn notional(&self) -> Option<Decimal> {
        self.price.map(|p| p * self.quantity)
    }
}
