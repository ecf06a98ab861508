//! Session configuration - from a YAML file or interactive prompts
//!
//! ```yaml
//! assets: AAPL, @DOGE
//! streamer: dummy
//! broker: paper
//! secret_path: ""
//! basic_account: y
//! alpaca_paper_trader: true
//! interval: 1MIN
//! storage_dir: gnat_storage
//! ```

use std::path::{Path, PathBuf};

use gnat_core::{Interval, Symbol, parse_symbol_list};
use gnat_gateway::{ConfigurationError, ConnectorConfig};
use gnat_ports::Prompter;
use log::info;
use serde::Deserialize;

use crate::storage::DEFAULT_STORAGE_DIR;

pub const ASSETS_QUESTION: &str = "List your assets' ticker with comma seperation. For cryptos, prefex the ticker with an '@' (e.g @DOGE).";
pub const STREAMER_QUESTION: &str = "Pick a streamer: dummy, yahoo, polygon, alpaca.";
pub const BROKER_QUESTION: &str = "Pick a broker: paper, alpaca.";
pub const SECRET_PATH_QUESTION: &str = "Path to secret.yaml if needed.";

/// Everything a session needs before workers start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub symbols: Vec<Symbol>,
    pub connectors: ConnectorConfig,
    pub interval: Interval,
    pub storage_dir: PathBuf,
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        info!("Loading configuration from: {}", path.display());
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::Malformed(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigurationError> {
        let file: SessionFile =
            serde_yaml_bw::from_str(raw).map_err(|e| ConfigurationError::Malformed(e.to_string()))?;
        file.into_config()
    }

    /// Collect assets, streamer, broker and secret path through `prompter`
    ///
    /// Account flags stay unset; the connector factory asks for them if needed.
    pub fn prompt<P: Prompter + ?Sized>(prompter: &mut P) -> Result<Self, ConfigurationError> {
        let assets = ask(prompter, ASSETS_QUESTION)?;
        let streamer = ask(prompter, STREAMER_QUESTION)?;
        let broker = ask(prompter, BROKER_QUESTION)?;
        let secret_path = ask(prompter, SECRET_PATH_QUESTION)?;

        Ok(Self {
            symbols: parse_symbol_list(&assets),
            connectors: ConnectorConfig::from_names(&streamer, &broker)?
                .with_secret_path(Some(&secret_path)),
            interval: Interval::default(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        })
    }
}

fn ask<P: Prompter + ?Sized>(prompter: &mut P, question: &str) -> Result<String, ConfigurationError> {
    prompter
        .ask(question)?
        .ok_or_else(|| ConfigurationError::PromptClosed(question.to_string()))
}

/// On-disk shape of the configuration file
#[derive(Debug, Deserialize)]
struct SessionFile {
    assets: AssetList,
    streamer: String,
    broker: String,
    #[serde(default)]
    secret_path: Option<String>,
    #[serde(default)]
    basic_account: Option<FlagValue>,
    #[serde(default)]
    alpaca_paper_trader: Option<FlagValue>,
    #[serde(default)]
    interval: Interval,
    #[serde(default)]
    storage_dir: Option<PathBuf>,
}

impl SessionFile {
    fn into_config(self) -> Result<SessionConfig, ConfigurationError> {
        let mut connectors = ConnectorConfig::from_names(&self.streamer, &self.broker)?
            .with_secret_path(self.secret_path.as_deref());
        connectors.basic_account = self.basic_account.map(FlagValue::as_bool);
        connectors.paper_trader = self.alpaca_paper_trader.map(FlagValue::as_bool);

        Ok(SessionConfig {
            symbols: self.assets.into_symbols(),
            connectors,
            interval: self.interval,
            storage_dir: self
                .storage_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR)),
        })
    }
}

/// `AAPL, @DOGE` or a YAML sequence
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssetList {
    Csv(String),
    List(Vec<String>),
}

impl AssetList {
    fn into_symbols(self) -> Vec<Symbol> {
        match self {
            AssetList::Csv(raw) => parse_symbol_list(&raw),
            AssetList::List(items) => parse_symbol_list(&items.join(",")),
        }
    }
}

/// YAML boolean or a `y`/`n` style answer
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Text(String),
}

impl FlagValue {
    fn as_bool(self) -> bool {
        match self {
            FlagValue::Bool(b) => b,
            FlagValue::Text(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "true"),
        }
    }
}
