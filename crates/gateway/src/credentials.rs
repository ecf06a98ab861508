//! API credentials read from the user's secret file

use std::collections::HashMap;
use std::path::Path;

use crate::config::ConnectorKind;
use crate::error::{ConfigurationError, Result};

pub const POLYGON_API_KEY: &str = "polygon_api_key";
pub const ALPACA_API_KEY_ID: &str = "alpaca_api_key_id";
pub const ALPACA_SECRET_KEY: &str = "alpaca_secret_key";

/// Flat key/value map loaded from a YAML secret file
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    values: HashMap<String, String>,
}

impl Credentials {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from a YAML mapping of string keys to string values
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Credentials {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&raw).map_err(|reason| ConfigurationError::Credentials {
            path: path.display().to_string(),
            reason,
        })
    }

    fn from_yaml(raw: &str) -> std::result::Result<Self, String> {
        if raw.trim().is_empty() {
            return Ok(Self::empty());
        }
        let values: HashMap<String, String> =
            serde_yaml_bw::from_str(raw).map_err(|e| e.to_string())?;
        Ok(Self { values })
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a key the given connector cannot work without
    pub fn require(&self, connector: ConnectorKind, key: &str) -> Result<&str> {
        self.get(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigurationError::MissingCredentials {
                connector,
                key: key.to_string(),
            })
    }
}
