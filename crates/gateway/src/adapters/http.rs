//! Blocking REST plumbing shared by the HTTP connectors

use std::str::FromStr;
use std::time::Duration;

use gnat_ports::{ConnectorError, ConnectorResult};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::ConfigurationError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("gnat/", env!("CARGO_PKG_VERSION"));

pub(crate) fn client() -> Result<Client, ConfigurationError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ConfigurationError::Http(e.to_string()))
}

/// Send a request and decode a JSON body into `T`
pub(crate) fn send<T: DeserializeOwned>(request: RequestBuilder) -> ConnectorResult<T> {
    let resp = request
        .send()
        .map_err(|e| ConnectorError::Network(e.to_string()))?;
    handle_response(resp)
}

fn handle_response<T: DeserializeOwned>(resp: Response) -> ConnectorResult<T> {
    let status = resp.status();
    let text = resp
        .text()
        .map_err(|e| ConnectorError::Network(e.to_string()))?;

    match status {
        s if s.is_success() => decode(&text),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(ConnectorError::Auth(format!("HTTP {}: {}", status, text)))
        }
        StatusCode::NOT_FOUND => Err(ConnectorError::UnknownSymbol(text)),
        StatusCode::UNPROCESSABLE_ENTITY => Err(ConnectorError::Rejected(text)),
        _ => Err(ConnectorError::Network(format!("HTTP {}: {}", status, text))),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(text: &str) -> ConnectorResult<T> {
    serde_json::from_str(text).map_err(|e| ConnectorError::Decode(e.to_string()))
}

/// Decimal from a JSON number or numeric string
pub(crate) fn decimal<'de, D: Deserializer<'de>>(de: D) -> Result<Decimal, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(serde_json::Number),
        Str(String),
    }

    let text = match Raw::deserialize(de)? {
        Raw::Num(n) => n.to_string(),
        Raw::Str(s) => s,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(serde::de::Error::custom)
}

/// Like [`decimal`], for nullable fields
pub(crate) fn opt_decimal<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Decimal>, D::Error> {
    #[derive(Deserialize)]
    struct Wrap(#[serde(deserialize_with = "decimal")] Decimal);

    Ok(Option::<Wrap>::deserialize(de)?.map(|Wrap(d)| d))
}

/// Float price to Decimal, trimming binary float noise
pub(crate) fn float_price(value: f64) -> ConnectorResult<Decimal> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(6).normalize())
        .map_err(|e| ConnectorError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "decimal")]
        a: Decimal,
        #[serde(deserialize_with = "decimal")]
        b: Decimal,
        #[serde(default, deserialize_with = "opt_decimal")]
        c: Option<Decimal>,
    }

    #[test]
    fn test_decimal_from_number_or_string() {
        let s: Sample = decode(r#"{"a": 1.5, "b": "2.25", "c": null}"#).unwrap();
        assert_eq!(s.a, dec!(1.5));
        assert_eq!(s.b, dec!(2.25));
        assert_eq!(s.c, None);

        let s: Sample = decode(r#"{"a": 1, "b": "0", "c": "9.5"}"#).unwrap();
        assert_eq!(s.c, Some(dec!(9.5)));
    }

    #[test]
    fn test_decode_error() {
        let err = decode::<Sample>("not json").err().unwrap();
        assert!(matches!(err, ConnectorError::Decode(_)));
    }
}
