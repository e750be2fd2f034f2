//! Server Error Types

use thiserror::Error;

/// Startup and serving failures
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid log level {0:?}")]
    InvalidLogLevel(String),
    #[error("Failed to install tracing subscriber: {0}")]
    Logging(String),
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
