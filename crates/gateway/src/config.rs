//! Connector configuration and account flag resolution

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use gnat_ports::Prompter;

use crate::error::{ConfigurationError, Result};

pub const BASIC_ACCOUNT_QUESTION: &str = "Is your account a basic account? (y/n)";
pub const PAPER_TRADER_QUESTION: &str = "Do you want to use Alpaca's paper trader? (y/n)";

/// Closed set of connector kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    Dummy,
    Yahoo,
    Polygon,
    Alpaca,
    Paper,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 5] = [
        ConnectorKind::Dummy,
        ConnectorKind::Yahoo,
        ConnectorKind::Polygon,
        ConnectorKind::Alpaca,
        ConnectorKind::Paper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorKind::Dummy => "dummy",
            ConnectorKind::Yahoo => "yahoo",
            ConnectorKind::Polygon => "polygon",
            ConnectorKind::Alpaca => "alpaca",
            ConnectorKind::Paper => "paper",
        }
    }

    /// Whether this kind can supply market data
    pub fn can_stream(&self) -> bool {
        !matches!(self, ConnectorKind::Paper)
    }

    /// Whether this kind can be a broker next to a different streamer
    pub fn is_standalone_broker(&self) -> bool {
        matches!(self, ConnectorKind::Paper | ConnectorKind::Alpaca)
    }

    /// Whether this kind behaves differently for basic accounts
    pub fn needs_basic_account(&self) -> bool {
        matches!(self, ConnectorKind::Polygon | ConnectorKind::Alpaca)
    }

    /// Whether this kind can route to a paper trading endpoint
    pub fn needs_paper_trader(&self) -> bool {
        matches!(self, ConnectorKind::Alpaca)
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| ConfigurationError::UnknownKind(s.trim().to_string()))
    }
}

/// Connector selection, possibly with account flags still unknown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    pub streamer: ConnectorKind,
    pub broker: ConnectorKind,
    pub secret_path: Option<PathBuf>,
    pub basic_account: Option<bool>,
    pub paper_trader: Option<bool>,
}

impl ConnectorConfig {
    pub fn new(streamer: ConnectorKind, broker: ConnectorKind) -> Self {
        Self {
            streamer,
            broker,
            secret_path: None,
            basic_account: None,
            paper_trader: None,
        }
    }

    /// Build from connector names as typed by the user or read from a file
    pub fn from_names(streamer: &str, broker: &str) -> Result<Self> {
        Ok(Self::new(streamer.parse()?, broker.parse()?))
    }

    /// Set the secret file path; blank input means no file
    pub fn with_secret_path(mut self, path: Option<&str>) -> Self {
        self.secret_path = normalize_secret_path(path);
        self
    }

    pub fn with_basic_account(mut self, basic: bool) -> Self {
        self.basic_account = Some(basic);
        self
    }

    pub fn with_paper_trader(mut self, paper: bool) -> Self {
        self.paper_trader = Some(paper);
        self
    }

    /// Whether the streamer and broker are served by one connector
    pub fn is_aliased(&self) -> bool {
        self.streamer == self.broker
    }

    /// Reject streamer/broker combinations that cannot be built
    pub fn validate_roles(&self) -> Result<()> {
        if !self.streamer.can_stream() {
            return Err(ConfigurationError::NotAStreamer(self.streamer));
        }
        if !self.is_aliased() && !self.broker.is_standalone_broker() {
            return Err(ConfigurationError::UnsupportedBroker {
                broker: self.broker,
                streamer: self.streamer,
            });
        }
        Ok(())
    }

    /// Fill in every missing flag a selected connector needs
    ///
    /// Each flag is asked at most once, even when one kind serves both roles.
    /// Flags no selected connector needs default to `false` without prompting.
    pub fn resolve_flags<P: Prompter + ?Sized>(
        self,
        prompter: &mut P,
    ) -> Result<ResolvedConnectorConfig> {
        self.validate_roles()?;

        let kinds = [self.streamer, self.broker];
        let basic_account = match self.basic_account {
            Some(v) => v,
            None if kinds.iter().any(|k| k.needs_basic_account()) => {
                ask_flag(prompter, BASIC_ACCOUNT_QUESTION)?
            }
            None => false,
        };
        let paper_trader = match self.paper_trader {
            Some(v) => v,
            None if kinds.iter().any(|k| k.needs_paper_trader()) => {
                ask_flag(prompter, PAPER_TRADER_QUESTION)?
            }
            None => false,
        };

        Ok(ResolvedConnectorConfig {
            streamer: self.streamer,
            broker: self.broker,
            secret_path: self.secret_path,
            basic_account,
            paper_trader,
        })
    }
}

/// Connector selection with every flag decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConnectorConfig {
    pub streamer: ConnectorKind,
    pub broker: ConnectorKind,
    pub secret_path: Option<PathBuf>,
    pub basic_account: bool,
    pub paper_trader: bool,
}

impl ResolvedConnectorConfig {
    pub fn is_aliased(&self) -> bool {
        self.streamer == self.broker
    }
}

pub fn normalize_secret_path(path: Option<&str>) -> Option<PathBuf> {
    path.map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

fn ask_flag<P: Prompter + ?Sized>(prompter: &mut P, question: &str) -> Result<bool> {
    prompter
        .confirm(question)?
        .ok_or_else(|| ConfigurationError::PromptClosed(question.to_string()))
}
