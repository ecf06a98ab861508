//! Gnat Gateway
//!
//! Connector layer for the gnat trading supervisor. Provides:
//! - Connector configuration and interactive resolution of missing account flags
//! - Credentials loading from a secret file
//! - Connector adapters (dummy, Yahoo, Polygon, Alpaca, paper)
//! - `ConnectorFactory`, which turns a configuration into a streamer/broker pair
//!
//! ## Resolution
//!
//! ```text
//! ConnectorConfig (file or prompts)
//!         │  resolve_flags (may prompt y/n)
//!    ┌────▼──────────────────┐
//!    │ResolvedConnectorConfig│
//!    └────┬──────────────────┘
//!         │  ConnectorFactory::build
//!    ┌────▼────┐        ┌────────┐
//!    │Streamer │◄───────│ Broker │  (paper wraps the streamer,
//!    └─────────┘        └────────┘   same kind aliases it)
//! ```
//!
//! Everything here runs once, on the main thread, before any worker starts.

pub mod adapters;
pub mod config;
pub mod credentials;
pub mod error;
pub mod factory;

// Re-export commonly used types
pub use config::{ConnectorConfig, ConnectorKind, ResolvedConnectorConfig};
pub use credentials::Credentials;
pub use error::{ConfigurationError, Result};
pub use factory::{ConnectorFactory, Connectors};
