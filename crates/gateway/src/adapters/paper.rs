//! Paper broker - simulated fills against the streamer's latest close

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use gnat_core::{Fill, OrderRequest, Price, Quantity, Side, Symbol};
use gnat_ports::{Broker, ConnectorError, ConnectorResult, Streamer};
use log::{debug, info};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Cash a fresh paper account starts with
pub const STARTING_CASH: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Simulated account state
#[derive(Debug, Clone, PartialEq)]
pub struct PaperAccount {
    pub cash: Price,
    pub positions: HashMap<Symbol, Quantity>,
}

impl PaperAccount {
    pub fn new(cash: Price) -> Self {
        Self {
            cash,
            positions: HashMap::new(),
        }
    }

    pub fn position(&self, symbol: &str) -> Quantity {
        self.positions.get(symbol).copied().unwrap_or_default()
    }

    fn apply(&mut self, symbol: &str, side: Side, quantity: Quantity, price: Price) -> ConnectorResult<()> {
        let notional = price * quantity;
        match side {
            Side::Buy => {
                if notional > self.cash {
                    return Err(ConnectorError::Rejected(format!(
                        "insufficient cash: need {}, have {}",
                        notional, self.cash
                    )));
                }
                self.cash -= notional;
                *self.positions.entry(symbol.to_string()).or_default() += quantity;
            }
            Side::Sell => {
                let held = self.position(symbol);
                if quantity > held {
                    return Err(ConnectorError::Rejected(format!(
                        "insufficient position in {}: need {}, have {}",
                        symbol, quantity, held
                    )));
                }
                self.cash += notional;
                let remaining = held - quantity;
                if remaining.is_zero() {
                    self.positions.remove(symbol);
                } else {
                    self.positions.insert(symbol.to_string(), remaining);
                }
            }
        }
        Ok(())
    }
}

impl Default for PaperAccount {
    fn default() -> Self {
        Self::new(STARTING_CASH)
    }
}

pub struct PaperBroker {
    streamer: Arc<dyn Streamer>,
    account: Mutex<PaperAccount>,
}

impl PaperBroker {
    pub fn new(streamer: Arc<dyn Streamer>) -> Self {
        Self::with_account(streamer, PaperAccount::default())
    }

    pub fn with_account(streamer: Arc<dyn Streamer>, account: PaperAccount) -> Self {
        info!(
            "Paper broker on {} with {} cash",
            streamer.name(),
            account.cash
        );
        Self {
            streamer,
            account: Mutex::new(account),
        }
    }

    /// Snapshot of the account
    pub fn account(&self) -> PaperAccount {
        self.account.lock().clone()
    }
}

impl Broker for PaperBroker {
    fn name(&self) -> &str {
        "paper"
    }

    fn submit(&self, order: &OrderRequest) -> ConnectorResult<Fill> {
        // Quote first; the account lock is never held across a fetch
        let price = self.streamer.last_price(&order.symbol)?;

        self.account
            .lock()
            .apply(&order.symbol, order.side, order.quantity, price)?;

        debug!(
            "Paper fill {} {} {} @ {}",
            order.side, order.quantity, order.symbol, price
        );
        Ok(Fill {
            client_order_id: order.client_order_id,
            broker_order_id: Some(Uuid::new_v4().to_string()),
            symbol: order.symbol.clone(),
            side: order.side,
            quantity: order.quantity,
            price: Some(price),
            filled_at: Utc::now(),
        })
    }
}
