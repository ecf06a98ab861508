//! Yahoo Finance connector - public chart endpoint, data only

use chrono::{DateTime, Utc};
use gnat_core::{AssetClass, Bar, Fill, OrderRequest};
use gnat_ports::{Broker, ConnectorError, ConnectorResult, Streamer};
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::http;
use crate::error::ConfigurationError;

const BASE_URL: &str = "https://query1.finance.yahoo.com";

pub struct YahooConnector {
    client: Client,
    base_url: String,
}

impl YahooConnector {
    pub fn new() -> Result<Self, ConfigurationError> {
        Ok(Self {
            client: http::client()?,
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Yahoo ticker for a gnat symbol (`@DOGE` -> `DOGE-USD`)
    pub fn ticker(symbol: &str) -> String {
        match AssetClass::of(symbol) {
            AssetClass::Crypto => format!("{}-USD", AssetClass::base(symbol)),
            AssetClass::Equity => symbol.to_string(),
        }
    }
}

impl Streamer for YahooConnector {
    fn name(&self) -> &str {
        "yahoo"
    }

    fn latest_bar(&self, symbol: &str) -> ConnectorResult<Bar> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1m&range=1d",
            self.base_url,
            Self::ticker(symbol)
        );
        let resp: ChartResponse = http::send(self.client.get(&url))?;
        resp.into_bar(symbol)
    }
}

impl Broker for YahooConnector {
    fn name(&self) -> &str {
        "yahoo"
    }

    fn submit(&self, _order: &OrderRequest) -> ConnectorResult<Fill> {
        Err(ConnectorError::Unsupported("yahoo".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

impl ChartResponse {
    /// Most recent complete bar in the chart
    fn into_bar(self, symbol: &str) -> ConnectorResult<Bar> {
        if let Some(err) = self.chart.error {
            return Err(ConnectorError::UnknownSymbol(format!(
                "{}: {} ({})",
                symbol, err.description, err.code
            )));
        }

        let result = self
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| ConnectorError::UnknownSymbol(symbol.to_string()))?;
        let quote = result
            .indicators
            .quote
            .first()
            .ok_or_else(|| ConnectorError::Decode("chart has no quote".to_string()))?;

        let at = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten();

        (0..result.timestamp.len())
            .rev()
            .find_map(|i| {
                Some((
                    result.timestamp[i],
                    at(&quote.open, i)?,
                    at(&quote.high, i)?,
                    at(&quote.low, i)?,
                    at(&quote.close, i)?,
                    at(&quote.volume, i).unwrap_or(0.0),
                ))
            })
            .ok_or_else(|| ConnectorError::UnknownSymbol(symbol.to_string()))
            .and_then(|(ts, open, high, low, close, volume)| {
                Ok(Bar {
                    symbol: symbol.to_string(),
                    timestamp: DateTime::<Utc>::from_timestamp(ts, 0)
                        .ok_or_else(|| ConnectorError::Decode(format!("bad timestamp {}", ts)))?,
                    open: http::float_price(open)?,
                    high: http::float_price(high)?,
                    low: http::float_price(low)?,
                    close: http::float_price(close)?,
                    volume: Decimal::try_from(volume).unwrap_or_default().trunc(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL"},
                "timestamp": [1700000000, 1700000060, 1700000120],
                "indicators": {"quote": [{
                    "open":   [189.5, 190.0, null],
                    "high":   [190.2, 190.75, null],
                    "low":    [189.1, 189.9, null],
                    "close":  [190.0, 190.5, null],
                    "volume": [12000, 8000, null]
                }]}
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_ticker_mapping() {
        assert_eq!(YahooConnector::ticker("AAPL"), "AAPL");
        assert_eq!(YahooConnector::ticker("@DOGE"), "DOGE-USD");
    }

    #[test]
    fn test_decode_skips_incomplete_trailing_bar() {
        let resp: ChartResponse = http::decode(CHART).unwrap();
        let bar = resp.into_bar("AAPL").unwrap();
        assert_eq!(bar.symbol, "AAPL");
        assert_eq!(bar.timestamp.timestamp(), 1700000060);
        assert_eq!(bar.open, dec!(190));
        assert_eq!(bar.high, dec!(190.75));
        assert_eq!(bar.close, dec!(190.5));
        assert_eq!(bar.volume, dec!(8000));
    }

    #[test]
    fn test_decode_error_payload() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        let resp: ChartResponse = http::decode(body).unwrap();
        assert!(matches!(
            resp.into_bar("ZZZZ"),
            Err(ConnectorError::UnknownSymbol(_))
        ));
    }

    #[test]
    fn test_broker_side_is_unsupported() {
        let yahoo = YahooConnector::new().unwrap();
        let order = OrderRequest::market("AAPL", gnat_core::Side::Buy, dec!(1));
        assert!(matches!(
            yahoo.submit(&order),
            Err(ConnectorError::Unsupported(_))
        ));
    }
}
