//! Logging configuration

use serde::Deserialize;

use super::error::ValidationError;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Tracing subscriber settings. `RUST_LOG` wins over `level` when set.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ValidationError::InvalidLogLevel(self.level.clone()))
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_levels_in_any_case() {
        let config = LoggingConfig {
            level: "DEBUG".to_string(),
            json: true,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_level() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            json: false,
        };
        assert!(config.validate().is_err());
    }
}
