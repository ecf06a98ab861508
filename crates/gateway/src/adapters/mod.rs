//! Connector adapters
//!
//! Each adapter normalizes a data/broker API into the `Streamer` and
//! `Broker` ports. A connector that serves both roles implements both traits
//! so the factory can share one instance between them.

pub mod alpaca;
pub mod dummy;
mod http;
pub mod paper;
pub mod polygon;
pub mod yahoo;

pub use alpaca::AlpacaConnector;
pub use dummy::DummyConnector;
pub use paper::{PaperAccount, PaperBroker};
pub use polygon::PolygonConnector;
pub use yahoo::YahooConnector;
