//! Connector factory - turns a connector configuration into live connectors

use std::sync::Arc;

use gnat_ports::{Broker, Prompter, Streamer};
use log::{info, warn};

use crate::adapters::{AlpacaConnector, DummyConnector, PaperBroker, PolygonConnector, YahooConnector};
use crate::config::{ConnectorConfig, ConnectorKind, ResolvedConnectorConfig};
use crate::credentials::Credentials;
use crate::error::{ConfigurationError, Result};

/// The streamer/broker pair a session trades with
///
/// When both roles name the same kind, both handles point at one instance.
#[derive(Clone)]
pub struct Connectors {
    pub streamer: Arc<dyn Streamer>,
    pub broker: Arc<dyn Broker>,
}

impl Connectors {
    /// Build from one connector serving both roles
    pub fn shared<C>(connector: C) -> Self
    where
        C: Streamer + Broker + 'static,
    {
        let connector = Arc::new(connector);
        Self {
            streamer: connector.clone(),
            broker: connector,
        }
    }

    /// Whether the streamer and broker are the same instance
    pub fn is_aliased(&self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.streamer), Arc::as_ptr(&self.broker))
    }
}

impl std::fmt::Debug for Connectors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connectors")
            .field("streamer", &self.streamer.name())
            .field("broker", &self.broker.name())
            .field("aliased", &self.is_aliased())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectorFactory {
    dummy_seed: Option<u64>,
}

impl ConnectorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the dummy connector's random walk reproducible
    pub fn with_dummy_seed(mut self, seed: u64) -> Self {
        self.dummy_seed = Some(seed);
        self
    }

    /// Resolve missing flags through `prompter`, then build the connectors
    pub fn resolve<P: Prompter + ?Sized>(
        &self,
        config: ConnectorConfig,
        prompter: &mut P,
    ) -> Result<Connectors> {
        let resolved = config.resolve_flags(prompter)?;
        self.build(&resolved)
    }

    /// Build connectors from a fully resolved configuration
    pub fn build(&self, config: &ResolvedConnectorConfig) -> Result<Connectors> {
        let primary = self.build_streamer(config)?;

        let connectors = if config.is_aliased() {
            if matches!(config.broker, ConnectorKind::Yahoo | ConnectorKind::Polygon) {
                warn!("{} does not route orders; user orders will fail", config.broker);
            }
            primary
        } else {
            let broker: Arc<dyn Broker> = match config.broker {
                ConnectorKind::Paper => Arc::new(PaperBroker::new(primary.streamer.clone())),
                ConnectorKind::Alpaca => Arc::new(AlpacaConnector::new(
                    &self.credentials(config)?,
                    config.basic_account,
                    config.paper_trader,
                )?),
                other => {
                    return Err(ConfigurationError::UnsupportedBroker {
                        broker: other,
                        streamer: config.streamer,
                    });
                }
            };
            Connectors {
                streamer: primary.streamer,
                broker,
            }
        };

        info!(
            "Connectors ready: streamer={} broker={}{}",
            connectors.streamer.name(),
            connectors.broker.name(),
            if connectors.is_aliased() { " (shared)" } else { "" }
        );
        Ok(connectors)
    }

    /// Build the streamer kind; the result serves both roles
    fn build_streamer(&self, config: &ResolvedConnectorConfig) -> Result<Connectors> {
        match config.streamer {
            ConnectorKind::Dummy => Ok(Connectors::shared(match self.dummy_seed {
                Some(seed) => DummyConnector::seeded(seed),
                None => DummyConnector::new(),
            })),
            ConnectorKind::Yahoo => Ok(Connectors::shared(YahooConnector::new()?)),
            ConnectorKind::Polygon => Ok(Connectors::shared(PolygonConnector::new(
                &self.credentials(config)?,
                config.basic_account,
            )?)),
            ConnectorKind::Alpaca => Ok(Connectors::shared(AlpacaConnector::new(
                &self.credentials(config)?,
                config.basic_account,
                config.paper_trader,
            )?)),
            ConnectorKind::Paper => Err(ConfigurationError::NotAStreamer(ConnectorKind::Paper)),
        }
    }

    fn credentials(&self, config: &ResolvedConnectorConfig) -> Result<Credentials> {
        match &config.secret_path {
            Some(path) => Credentials::load(path),
            None => Ok(Credentials::empty()),
        }
    }
}
