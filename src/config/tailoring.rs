//! Tailoring defaults

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::TargetLanguage;
use crate::domain::tailoring::{
    TailoringOptions, TailoringStyle, DEFAULT_MAX_BULLETS, DEFAULT_MAX_BULLETS_PER_EXPERIENCE,
    DEFAULT_TAILOR_CONCURRENCY,
};

/// Defaults applied when a caller doesn't override them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TailoringConfig {
    #[serde(default = "default_max_bullets")]
    pub max_bullets: usize,

    /// 0 disables the per-experience cap
    #[serde(default = "default_max_bullets_per_experience")]
    pub max_bullets_per_experience: usize,

    /// Parallel TailorBullet calls
    #[serde(default = "default_concurrency")]
    pub tailor_concurrency: usize,

    #[serde(default)]
    pub default_style: TailoringStyle,

    #[serde(default = "default_language")]
    pub default_language: String,
}

impl TailoringConfig {
    pub fn language(&self) -> Result<TargetLanguage, ValidationError> {
        TargetLanguage::new(&self.default_language)
            .map_err(|_| ValidationError::InvalidLanguage(self.default_language.clone()))
    }

    /// Options seeded from these defaults.
    pub fn options(&self) -> Result<TailoringOptions, ValidationError> {
        let cap = match self.max_bullets_per_experience {
            0 => None,
            max => Some(max),
        };
        Ok(TailoringOptions::default()
            .with_max_bullets(self.max_bullets)
            .with_max_bullets_per_experience(cap)
            .with_concurrency(self.tailor_concurrency)
            .with_style(self.default_style)
            .with_target_language(self.language()?))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_bullets == 0 {
            return Err(ValidationError::MustBePositive("max_bullets"));
        }
        if self.tailor_concurrency == 0 {
            return Err(ValidationError::MustBePositive("tailor_concurrency"));
        }
        self.language()?;
        Ok(())
    }
}

impl Default for TailoringConfig {
    fn default() -> Self {
        Self {
            max_bullets: default_max_bullets(),
            max_bullets_per_experience: default_max_bullets_per_experience(),
            tailor_concurrency: default_concurrency(),
            default_style: TailoringStyle::default(),
            default_language: default_language(),
        }
    }
}

fn default_max_bullets() -> usize {
    DEFAULT_MAX_BULLETS
}

fn default_max_bullets_per_experience() -> usize {
    DEFAULT_MAX_BULLETS_PER_EXPERIENCE
}

fn default_concurrency() -> usize {
    DEFAULT_TAILOR_CONCURRENCY
}

fn default_language() -> String {
    "en".to_string()
}
