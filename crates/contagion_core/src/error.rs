//! Error types for contagion_core.
//!
//! The simulation itself is closed and numeric; the only recoverable failures
//! are bad configuration and bad tick input. I/O variants exist for the event
//! logger and config loading done by the application layer.

use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A configuration value is out of its valid domain
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration text could not be parsed
    #[error("Config parse error: {0}")]
    Parse(String),

    /// Tick delta was negative or not finite
    #[error("Invalid tick delta: {0}")]
    InvalidDelta(f64),

    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
