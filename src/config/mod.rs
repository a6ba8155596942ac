//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RESUME_TAILOR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use resume_tailor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Retrying AI calls {} times", config.ai.max_retries);
//! ```

mod ai;
mod error;
mod logging;
mod tailoring;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use tailoring::TailoringConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI backend configuration (Anthropic, retry policy)
    #[serde(default)]
    pub ai: AiConfig,

    /// Tailoring defaults (bullet limits, style, language)
    #[serde(default)]
    pub tailoring: TailoringConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RESUME_TAILOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RESUME_TAILOR__AI__MAX_RETRIES=5` -> `ai.max_retries = 5`
    /// - `RESUME_TAILOR__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RESUME_TAILOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.tailoring.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
