//! Dummy connector - random walk market data with instant fills
//!
//! Needs no network or credentials. Every symbol starts at a random price and
//! moves by up to one percent per bar. As a broker it fills market orders at
//! the symbol's last generated close.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use gnat_core::{Bar, Fill, OrderRequest, Price, Symbol, Timestamp};
use gnat_ports::{Broker, ConnectorResult, Streamer};
use log::debug;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use uuid::Uuid;

const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

struct Walk {
    price: Price,
    step: i32,
}

impl Walk {
    fn start(rng: &mut StdRng) -> Self {
        Self {
            price: Decimal::from(rng.gen_range(20i64..500)),
            step: 0,
        }
    }
}

struct DummyState {
    rng: StdRng,
    walks: HashMap<Symbol, Walk>,
}

pub struct DummyConnector {
    start: Timestamp,
    bar_length: Duration,
    state: Mutex<DummyState>,
}

impl DummyConnector {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic walk for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            start: Utc::now(),
            bar_length: Duration::minutes(1),
            state: Mutex::new(DummyState {
                rng,
                walks: HashMap::new(),
            }),
        }
    }

    /// Timestamp of the first generated bar
    pub fn starting_at(mut self, start: Timestamp) -> Self {
        self.start = start;
        self
    }

    /// Last generated close for `symbol`
    ///
    /// Never advances the walk. An unseen symbol gets its starting price.
    pub fn last_price(&self, symbol: &str) -> Price {
        let mut state = self.state.lock();
        let DummyState { rng, walks } = &mut *state;
        walks
            .entry(symbol.to_string())
            .or_insert_with(|| Walk::start(rng))
            .price
    }

    fn next_bar(&self, symbol: &str) -> Bar {
        let mut state = self.state.lock();
        let DummyState { rng, walks } = &mut *state;

        let walk = walks
            .entry(symbol.to_string())
            .or_insert_with(|| Walk::start(rng));

        let open = walk.price;
        let drift = Decimal::new(rng.gen_range(-100i64..=100), 4);
        let close = (open * (Decimal::ONE + drift)).round_dp(2).max(MIN_PRICE);
        let wick = Decimal::new(rng.gen_range(0i64..=20), 4);
        let high = (open.max(close) * (Decimal::ONE + wick)).round_dp(2);
        let low = (open.min(close) * (Decimal::ONE - wick))
            .round_dp(2)
            .max(MIN_PRICE);
        let volume = Decimal::from(rng.gen_range(100i64..10_000));

        let timestamp = self.start + self.bar_length * walk.step;
        walk.price = close;
        walk.step += 1;

        Bar {
            symbol: symbol.to_string(),
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl Default for DummyConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Streamer for DummyConnector {
    fn name(&self) -> &str {
        "dummy"
    }

    fn latest_bar(&self, symbol: &str) -> ConnectorResult<Bar> {
        Ok(self.next_bar(symbol))
    }

    fn last_price(&self, symbol: &str) -> ConnectorResult<Price> {
        Ok(DummyConnector::last_price(self, symbol))
    }
}

impl Broker for DummyConnector {
    fn name(&self) -> &str {
        "dummy"
    }

    fn submit(&self, order: &OrderRequest) -> ConnectorResult<Fill> {
        let price = self.last_price(&order.symbol);
        debug!(
            "Dummy fill {} {} {} @ {}",
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

#[cfg(test)]
mod tests {
    use super::*;
    use gnat_core::Side;
    use rust_decimal_macros::dec;

    #[test]
    fn test_seeded_walk_is_deterministic() {
        let a = DummyConnector::seeded(7);
        let b = DummyConnector::seeded(7);
        for _ in 0..5 {
            let bar_a = a.latest_bar("AAPL").unwrap();
            let bar_b = b.latest_bar("AAPL").unwrap();
            assert_eq!(bar_a.close, bar_b.close);
        }
    }

    #[test]
    fn test_bars_are_consistent() {
        let dummy = DummyConnector::seeded(1);
        let mut prev_close = None;
        for _ in 0..50 {
            let bar = dummy.latest_bar("@DOGE").unwrap();
            assert!(bar.low <= bar.open.min(bar.close));
            assert!(bar.high >= bar.open.max(bar.close));
            assert!(bar.close >= dec!(0.01));
            if let Some(prev) = prev_close {
                assert_eq!(bar.open, prev);
            }
            prev_close = Some(bar.close);
        }
    }

    #[test]
    fn test_timestamps_advance_by_one_minute() {
        let start = Utc::now();
        let dummy = DummyConnector::seeded(3).starting_at(start);
        let first = dummy.latest_bar("MSFT").unwrap();
        let second = dummy.latest_bar("MSFT").unwrap();
        assert_eq!(first.timestamp, start);
        assert_eq!(second.timestamp - first.timestamp, Duration::minutes(1));
    }

    #[test]
    fn test_latest_bars_covers_every_symbol() {
        let dummy = DummyConnector::seeded(5);
        let symbols = vec!["AAPL".to_string(), "@BTC".to_string()];
        let bars = dummy.latest_bars(&symbols).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].symbol, "AAPL");
        assert_eq!(bars[1].symbol, "@BTC");
    }

    #[test]
    fn test_fills_at_last_close() {
        let dummy = DummyConnector::seeded(11);
        let bar = dummy.latest_bar("AAPL").unwrap();
        let order = OrderRequest::market("AAPL", Side::Buy, dec!(10));
        let fill = dummy.submit(&order).unwrap();
        assert_eq!(fill.client_order_id, order.client_order_id);
        assert_eq!(fill.price, Some(bar.close));
        assert_eq!(fill.quantity, dec!(10));
    }

    #[test]
    fn test_quote_does_not_advance_walk() {
        let start = Utc::now();
        let dummy = DummyConnector::seeded(13).starting_at(start);
        let quoted = Streamer::last_price(&dummy, "AAPL").unwrap();
        let first = dummy.latest_bar("AAPL").unwrap();
        assert_eq!(first.open, quoted);
        assert_eq!(first.timestamp, start);

        assert_eq!(Streamer::last_price(&dummy, "AAPL").unwrap(), first.close);
        let second = dummy.latest_bar("AAPL").unwrap();
        assert_eq!(second.open, first.close);
        assert_eq!(second.timestamp - first.timestamp, Duration::minutes(1));
    }
}
