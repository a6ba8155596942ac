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
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Temperature must be between 0.0 and 1.0")]
    InvalidTemperature,

    #[error("{0} must be at least 1")]
    MustBePositive(&'static str),

    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: u64 },

    #[error("Invalid default language: {0}")]
    InvalidLanguage(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
