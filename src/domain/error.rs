//! Domain error types

use thiserror::Error;

/// Error when parsing an interval string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid interval: \"{input}\". Expected <number>ms, <number>s, <number>m or a combination (e.g., 500ms, 3s, 1m30s)")]
pub struct IntervalParseError {
    pub input: String,
}

/// Error when an unusable baud rate is provided
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid baud rate: \"{input}\". Expected a whole number between 50 and 4000000 (e.g., 9600, 115200)")]
pub struct InvalidBaudRateError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
