use thiserror::Error;

/// Failures raised by data/broker connectors during a trading cycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No data for symbol: {0}")]
    UnknownSymbol(String),

    #[error("Order rejected: {0}")]
    Rejected(String),

    #[error("Operation not supported by {0}")]
    Unsupported(String),
}

pub type ConnectorResult<T> = std::result::Result<T, ConnectorError>;

/// Failures of the history storage collaborator
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
