//! Polygon.io connector - aggregates API, data only
//!
//! Basic accounts only see end-of-day data, so they read the previous
//! session's aggregate. Full accounts read the latest minute aggregate.

use chrono::{DateTime, Duration, Utc};
use gnat_core::{AssetClass, Bar, Fill, OrderRequest};
use gnat_ports::{Broker, ConnectorError, ConnectorResult, Streamer};
use log::debug;
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::http;
use crate::config::ConnectorKind;
use crate::credentials::{Credentials, POLYGON_API_KEY};
use crate::error::ConfigurationError;

const BASE_URL: &str = "https://api.polygon.io";

/// Minute aggregates are requested over a window wide enough to span a weekend
const MINUTE_LOOKBACK_DAYS: i64 = 4;

pub struct PolygonConnector {
    client: Client,
    base_url: String,
    api_key: String,
    basic_account: bool,
}

impl PolygonConnector {
    pub fn new(credentials: &Credentials, basic_account: bool) -> Result<Self, ConfigurationError> {
        let api_key = credentials.require(ConnectorKind::Polygon, POLYGON_API_KEY)?;
        Ok(Self {
            client: http::client()?,
            base_url: BASE_URL.to_string(),
            api_key: api_key.to_string(),
            basic_account,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_basic_account(&self) -> bool {
        self.basic_account
    }

    /// Polygon ticker for a gnat symbol (`@DOGE` -> `X:DOGEUSD`)
    pub fn ticker(symbol: &str) -> String {
        match AssetClass::of(symbol) {
            AssetClass::Crypto => format!("X:{}USD", AssetClass::base(symbol)),
            AssetClass::Equity => symbol.to_string(),
        }
    }

    fn url(&self, symbol: &str) -> String {
        let ticker = Self::ticker(symbol);
        if self.basic_account {
            format!(
                "{}/v2/aggs/ticker/{}/prev?adjusted=true&apiKey={}",
                self.base_url, ticker, self.api_key
            )
        } else {
            let to = Utc::now().date_naive();
            let from = to - Duration::days(MINUTE_LOOKBACK_DAYS);
            format!(
                "{}/v2/aggs/ticker/{}/range/1/minute/{}/{}?adjusted=true&sort=desc&limit=1&apiKey={}",
                self.base_url, ticker, from, to, self.api_key
            )
        }
    }
}

impl Streamer for PolygonConnector {
    fn name(&self) -> &str {
        "polygon"
    }

    fn latest_bar(&self, symbol: &str) -> ConnectorResult<Bar> {
        debug!("Polygon request for {} (basic={})", symbol, self.basic_account);
        let resp: AggregatesResponse = http::send(self.client.get(self.url(symbol)))?;
        resp.into_bar(symbol)
    }
}

impl Broker for PolygonConnector {
    fn name(&self) -> &str {
        "polygon"
    }

    fn submit(&self, _order: &OrderRequest) -> ConnectorResult<Fill> {
        Err(ConnectorError::Unsupported("polygon".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    #[serde(default)]
    results: Vec<Aggregate>,
}

#[derive(Debug, Deserialize)]
struct Aggregate {
    #[serde(rename = "o", deserialize_with = "http::decimal")]
    open: Decimal,
    #[serde(rename = "h", deserialize_with = "http::decimal")]
    high: Decimal,
    #[serde(rename = "l", deserialize_with = "http::decimal")]
    low: Decimal,
    #[serde(rename = "c", deserialize_with = "http::decimal")]
    close: Decimal,
    #[serde(rename = "v", deserialize_with = "http::decimal")]
    volume: Decimal,
    /// Start of the aggregate window, epoch milliseconds
    #[serde(rename = "t")]
    timestamp_ms: i64,
}

impl AggregatesResponse {
    fn into_bar(self, symbol: &str) -> ConnectorResult<Bar> {
        let agg = self
            .results
            .into_iter()
            .max_by_key(|a| a.timestamp_ms)
            .ok_or_else(|| ConnectorError::UnknownSymbol(symbol.to_string()))?;
        let timestamp = DateTime::<Utc>::from_timestamp_millis(agg.timestamp_ms).ok_or_else(
            || ConnectorError::Decode(format!("bad timestamp {}", agg.timestamp_ms)),
        )?;

        Ok(Bar {
            symbol: symbol.to_string(),
            timestamp,
            open: agg.open,
            high: agg.high,
            low: agg.low,
            close: agg.close,
            volume: agg.volume,
        })
    }
}
