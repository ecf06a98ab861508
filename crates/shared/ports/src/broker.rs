use gnat_core::{Fill, OrderRequest};

use crate::error::ConnectorResult;

/// Port for order execution
///
/// Takes `&self` so one handle can be shared between threads; implementations
/// keep any account state behind their own lock.
pub trait Broker: Send + Sync {
    /// Connector name for logging
    fn name(&self) -> &str;

    /// Submit a market order
    fn submit(&self, order: &OrderRequest) -> ConnectorResult<Fill>;
}
