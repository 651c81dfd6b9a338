use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the client, pipeline, and config layers.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Fetch failed: {0}")]
    Fetch(String),
    #[error("Backend rejected request: {0}")]
    Backend(String),
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, DashboardError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] DashboardError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Decode(err.to_string())
    }
}
