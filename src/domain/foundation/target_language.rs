//! Output language for generated resume text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// ISO-639-1 language code (two lowercase ASCII letters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetLanguage(String);

impl TargetLanguage {
    /// Creates a language code, normalizing case.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let code = code.as_ref().trim().to_ascii_lowercase();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::invalid_format(
                "target_language",
                format!("'{}' is not a two-letter language code", code),
            ));
        }
        Ok(Self(code))
    }

    /// English.
    pub fn english() -> Self {
        Self("en".to_string())
    }

    /// Returns the code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Human-readable name used in prompts; falls back to the code.
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            "en" => "English",
            "es" => "Spanish",
            "pt" => "Portuguese",
            "fr" => "French",
            "de" => "German",
            "it" => "Italian",
            "nl" => "Dutch",
            _ => &self.0,
        }
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        Self::english()
    }
}

impl FromStr for TargetLanguage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TargetLanguage {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetLanguage> for String {
    fn from(lang: TargetLanguage) -> Self {
        lang.0
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case() {
        assert_eq!(TargetLanguage::new("ES").unwrap().code(), "es");
    }

    #[test]
    fn rejects_invalid_codes() {
        assert!(TargetLanguage::new("eng").is_err());
        assert!(TargetLanguage::new("e1").is_err());
        assert!(TargetLanguage::new("").is_err());
    }

    #[test]
    fn default_is_english() {
        let lang = TargetLanguage::default();
        assert_eq!(lang.code(), "en");
        assert_eq!(lang.display_name(), "English");
    }
}
