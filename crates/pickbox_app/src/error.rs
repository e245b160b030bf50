//! Error types for pickbox_app

use thiserror::Error;

/// Errors from the option source and the selection sink
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection failure, timeout, or unreadable body
    #[error("network error: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// Response parsed but has the wrong shape
    #[error("{0}")]
    InvalidPayload(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed but unusable
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur in the host application
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for pickbox_app operations
pub type Result<T> = std::result::Result<T, AppError>;
