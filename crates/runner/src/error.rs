//! Error types for the runner crate

use gnat_gateway::ConfigurationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Console error: {0}")]
    Console(#[from] std::io::Error),

    #[error("Failed to spawn {worker} thread: {source}")]
    Spawn {
        worker: &'static str,
        source: std::io::Error,
    },

    #[error("{0} thread panicked")]
    WorkerPanicked(String),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
