//! Error types for the gateway crate

use thiserror::Error;

use crate::config::ConnectorKind;

/// Fatal configuration errors; raised before any worker starts
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Unknown connector kind: {0}")]
    UnknownKind(String),

    #[error("{0} cannot be used as a streamer")]
    NotAStreamer(ConnectorKind),

    #[error("{broker} cannot be used as a broker with streamer {streamer}")]
    UnsupportedBroker {
        broker: ConnectorKind,
        streamer: ConnectorKind,
    },

    #[error("{connector} requires '{key}' in the secret file")]
    MissingCredentials {
        connector: ConnectorKind,
        key: String,
    },

    #[error("Failed to load credentials from {path}: {reason}")]
    Credentials { path: String, reason: String },

    #[error("Input closed while asking: {0}")]
    PromptClosed(String),

    #[error("Console error: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("Malformed configuration: {0}")]
    Malformed(String),

    #[error("Failed to build HTTP client: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
