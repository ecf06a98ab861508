//! Gnat Ports
//!
//! Port definitions (traits) for the gnat trading supervisor.
//! These define the boundaries between the orchestration core and its collaborators:
//! market data, order execution, strategy, history storage and the console.

mod broker;
mod error;
mod prompter;
mod storage;
mod strategy;
mod streamer;

pub use broker::Broker;
pub use error::{ConnectorError, ConnectorResult, StorageError};
pub use prompter::Prompter;
pub use storage::Storage;
pub use strategy::Strategy;
pub use streamer::Streamer;
