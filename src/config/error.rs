//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Log level must not be empty")]
    EmptyLogLevel,

    #[error("Data directory must not be empty when using file storage")]
    EmptyDataDir,

    #[error("History limit must be between {min} and {max}, got {actual}")]
    InvalidHistoryLimit {
        min: usize,
        max: usize,
        actual: usize,
    },
}
