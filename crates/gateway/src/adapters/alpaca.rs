//! Alpaca connector - market data and order routing
//!
//! Basic accounts read the free IEX feed, full accounts the SIP feed. Orders go
//! to the paper or live trading endpoint depending on the paper trader flag.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use gnat_core::{AssetClass, Bar, Fill, OrderRequest};
use gnat_ports::{Broker, ConnectorError, ConnectorResult, Streamer};
use log::{debug, info};
use reqwest::blocking::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::http;
use crate::config::ConnectorKind;
use crate::credentials::{ALPACA_API_KEY_ID, ALPACA_SECRET_KEY, Credentials};
use crate::error::ConfigurationError;

const DATA_URL: &str = "https://data.alpaca.markets";
const PAPER_TRADING_URL: &str = "https://paper-api.alpaca.markets";
const LIVE_TRADING_URL: &str = "https://api.alpaca.markets";

pub struct AlpacaConnector {
    client: Client,
    data_url: String,
    trading_url: String,
    key_id: String,
    secret_key: String,
    basic_account: bool,
    paper_trader: bool,
}

impl AlpacaConnector {
    pub fn new(
        credentials: &Credentials,
        basic_account: bool,
        paper_trader: bool,
    ) -> Result<Self, ConfigurationError> {
        let key_id = credentials.require(ConnectorKind::Alpaca, ALPACA_API_KEY_ID)?;
        let secret_key = credentials.require(ConnectorKind::Alpaca, ALPACA_SECRET_KEY)?;
        let trading_url = if paper_trader {
            PAPER_TRADING_URL
        } else {
            LIVE_TRADING_URL
        };
        info!(
            "Alpaca connector: feed={} trading={}",
            Self::feed_for(basic_account),
            trading_url
        );
        Ok(Self {
            client: http::client()?,
            data_url: DATA_URL.to_string(),
            trading_url: trading_url.to_string(),
            key_id: key_id.to_string(),
            secret_key: secret_key.to_string(),
            basic_account,
            paper_trader,
        })
    }

    pub fn with_urls(mut self, data_url: impl Into<String>, trading_url: impl Into<String>) -> Self {
        self.data_url = data_url.into();
        self.trading_url = trading_url.into();
        self
    }

    pub fn is_paper(&self) -> bool {
        self.paper_trader
    }

    pub fn trading_url(&self) -> &str {
        &self.trading_url
    }

    pub fn feed(&self) -> &'static str {
        Self::feed_for(self.basic_account)
    }

    fn feed_for(basic_account: bool) -> &'static str {
        if basic_account { "iex" } else { "sip" }
    }

    /// Alpaca symbol for a gnat symbol (`@DOGE` -> `DOGE/USD`)
    pub fn ticker(symbol: &str) -> String {
        match AssetClass::of(symbol) {
            AssetClass::Crypto => format!("{}/USD", AssetClass::base(symbol)),
            AssetClass::Equity => symbol.to_string(),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("APCA-API-KEY-ID", &self.key_id)
            .header("APCA-API-SECRET-KEY", &self.secret_key)
    }
}

impl Streamer for AlpacaConnector {
    fn name(&self) -> &str {
        "alpaca"
    }

    fn latest_bar(&self, symbol: &str) -> ConnectorResult<Bar> {
        let ticker = Self::ticker(symbol);
        let raw = match AssetClass::of(symbol) {
            AssetClass::Equity => {
                let url = format!(
                    "{}/v2/stocks/{}/bars/latest?feed={}",
                    self.data_url,
                    ticker,
                    self.feed()
                );
                let resp: StockBarResponse = http::send(self.authorized(self.client.get(&url)))?;
                resp.bar
            }
            AssetClass::Crypto => {
                let url = format!("{}/v1beta3/crypto/us/latest/bars", self.data_url);
                let request = self.client.get(&url).query(&[("symbols", ticker.as_str())]);
                let mut resp: CryptoBarsResponse = http::send(self.authorized(request))?;
                resp.bars.remove(&ticker)
            }
        };
        raw.map(|b| b.into_bar(symbol))
            .ok_or_else(|| ConnectorError::UnknownSymbol(symbol.to_string()))
    }
}

impl Broker for AlpacaConnector {
    fn name(&self) -> &str {
        "alpaca"
    }

    fn submit(&self, order: &OrderRequest) -> ConnectorResult<Fill> {
        let body = NewOrder::from_request(order);
        debug!("Alpaca order: {:?}", body);
        let url = format!("{}/v2/orders", self.trading_url);
        let resp: OrderResponse = http::send(self.authorized(self.client.post(&url)).json(&body))?;
        Ok(resp.into_fill(order))
    }
}

#[derive(Debug, Deserialize)]
struct RawBar {
    #[serde(rename = "t")]
    timestamp: DateTime<Utc>,
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
}

impl RawBar {
    fn into_bar(self, symbol: &str) -> Bar {
        Bar {
            symbol: symbol.to_string(),
            timestamp: self.timestamp,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StockBarResponse {
    bar: Option<RawBar>,
}

#[derive(Debug, Deserialize)]
struct CryptoBarsResponse {
    #[serde(default)]
    bars: HashMap<String, RawBar>,
}

#[derive(Debug, Serialize)]
struct NewOrder {
    symbol: String,
    qty: String,
    side: &'static str,
    #[serde(rename = "type")]
    order_type: &'static str,
    time_in_force: &'static str,
    client_order_id: String,
}

impl NewOrder {
    fn from_request(order: &OrderRequest) -> Self {
        let time_in_force = match AssetClass::of(&order.symbol) {
            AssetClass::Crypto => "gtc",
            AssetClass::Equity => "day",
        };
        Self {
            symbol: AlpacaConnector::ticker(&order.symbol),
            qty: order.quantity.to_string(),
            side: order.side.as_str(),
            order_type: "market",
            time_in_force,
            client_order_id: order.client_order_id.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    status: String,
    #[serde(default, deserialize_with = "http::opt_decimal")]
    filled_avg_price: Option<Decimal>,
    #[serde(default)]
    filled_at: Option<DateTime<Utc>>,
}

impl OrderResponse {
    fn into_fill(self, order: &OrderRequest) -> Fill {
        debug!("Alpaca order {} status {}", self.id, self.status);
        Fill {
            client_order_id: order.client_order_id,
            broker_order_id: Some(self.id),
            symbol: order.symbol.clone(),
            side: order.side,
            quantity: order.quantity,
            price: self.filled_avg_price,
            filled_at: self.filled_at.unwrap_or_else(Utc::now),
        }
    }
}
