//! AI backend configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{AnthropicConfig, RetryPolicy};

/// AI backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Anthropic API key
    pub anthropic_api_key: Option<Secret<String>>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries after the first failed attempt
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// First backoff delay; doubles on each retry
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Upper bound for a single backoff delay
    pub backoff_max_ms: Option<u64>,

    /// Completion budget per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Backoff policy for every AI call.
    pub fn retry_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy::new(self.max_retries, Duration::from_millis(self.backoff_base_ms));
        match self.backoff_max_ms {
            Some(max) => policy.with_max_delay(Duration::from_millis(max)),
            None => policy,
        }
    }

    /// Provider settings for the Anthropic adapter.
    ///
    /// # Errors
    ///
    /// `MissingRequired` when no API key is configured.
    pub fn anthropic(&self) -> Result<AnthropicConfig, ValidationError> {
        let key = match &self.anthropic_api_key {
            Some(key) if self.has_anthropic() => key.clone(),
            _ => return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY")),
        };
        Ok(AnthropicConfig::from_secret(key)
            .with_model(&self.model)
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout())
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature))
    }

    /// Validate AI configuration
    ///
    /// The API key is checked separately by [`AiConfig::anthropic`] since
    /// offline runs don't need one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::MustBePositive("max_tokens"));
        }
        if self.max_tokens > MAX_OUTPUT_TOKENS {
            return Err(ValidationError::TooLarge {
                field: "max_tokens",
                max: u64::from(MAX_OUTPUT_TOKENS),
            });
        }
        if self.temperature.is_some_and(|t| !(0.0..=1.0).contains(&t)) {
            return Err(ValidationError::InvalidTemperature);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_max_ms: None,
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_retries() -> u32 {
    3
}

fn default_backoff_base_ms() -> u64 {
    1000
}

/// Largest completion budget any supported model accepts.
const MAX_OUTPUT_TOKENS: u32 = 200_000;

fn default_max_tokens() -> u32 {
    4096
}
