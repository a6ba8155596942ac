//! Caller-supplied knobs for a tailoring run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::experience::ExperienceType;
use crate::domain::foundation::{TargetLanguage, ValidationError};

pub const DEFAULT_MAX_BULLETS: usize = 12;
pub const DEFAULT_MAX_BULLETS_PER_EXPERIENCE: usize = 4;
pub const DEFAULT_TAILOR_CONCURRENCY: usize = 4;

/// Voice used when rewriting bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailoringStyle {
    #[default]
    Professional,
    Technical,
    Executive,
    Creative,
    Concise,
}

impl TailoringStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TailoringStyle::Professional => "professional",
            TailoringStyle::Technical => "technical",
            TailoringStyle::Executive => "executive",
            TailoringStyle::Creative => "creative",
            TailoringStyle::Concise => "concise",
        }
    }

    /// One-line instruction appended to rewrite prompts.
    pub fn guidance(&self) -> &'static str {
        match self {
            TailoringStyle::Professional => "Use a clear, professional tone.",
            TailoringStyle::Technical => {
                "Favour precise technical vocabulary, tools and measurable system outcomes."
            }
            TailoringStyle::Executive => {
                "Emphasise business impact, scope of ownership and strategic outcomes."
            }
            TailoringStyle::Creative => "Use vivid but truthful language that stands out.",
            TailoringStyle::Concise => "Keep it to a single short line.",
        }
    }
}

impl fmt::Display for TailoringStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TailoringStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professional" => Ok(TailoringStyle::Professional),
            "technical" => Ok(TailoringStyle::Technical),
            "executive" => Ok(TailoringStyle::Executive),
            "creative" => Ok(TailoringStyle::Creative),
            "concise" => Ok(TailoringStyle::Concise),
            _ => Err(ValidationError::invalid_format(
                "style",
                format!("unknown tailoring style '{}'", s),
            )),
        }
    }
}

/// Options for one tailoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailoringOptions {
    /// Upper bound on bullets in the generated resume.
    pub max_bullets: usize,
    /// Per-experience cap applied after backend selection.
    pub max_bullets_per_experience: Option<usize>,
    /// Experience categories eligible for selection; empty means all.
    pub include_types: Vec<ExperienceType>,
    /// Skills the caller wants surfaced first in the skill list.
    pub highlight_skills: Vec<String>,
    /// Overrides the resume's own target language.
    pub target_language: Option<TargetLanguage>,
    pub style: TailoringStyle,
    /// Parallel TailorBullet calls.
    pub concurrency: usize,
}

impl Default for TailoringOptions {
    fn default() -> Self {
        Self {
            max_bullets: DEFAULT_MAX_BULLETS,
            max_bullets_per_experience: Some(DEFAULT_MAX_BULLETS_PER_EXPERIENCE),
            include_types: Vec::new(),
            highlight_skills: Vec::new(),
            target_language: None,
            style: TailoringStyle::default(),
            concurrency: DEFAULT_TAILOR_CONCURRENCY,
        }
    }
}

impl TailoringOptions {
    pub fn with_max_bullets(mut self, max: usize) -> Self {
        self.max_bullets = max;
        self
    }

    pub fn with_max_bullets_per_experience(mut self, max: Option<usize>) -> Self {
        self.max_bullets_per_experience = max;
        self
    }

    pub fn with_include_types(mut self, types: Vec<ExperienceType>) -> Self {
        self.include_types = types;
        self
    }

    pub fn with_highlight_skills(mut self, skills: Vec<String>) -> Self {
        self.highlight_skills = skills;
        self
    }

    pub fn with_target_language(mut self, language: TargetLanguage) -> Self {
        self.target_language = Some(language);
        self
    }

    pub fn with_style(mut self, style: TailoringStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Rejects option sets that could never produce a resume.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_bullets == 0 {
            return Err(ValidationError::out_of_range("max_bullets", 1, i64::MAX, 0));
        }
        if self.max_bullets_per_experience == Some(0) {
            return Err(ValidationError::out_of_range(
                "max_bullets_per_experience",
                1,
                i64::MAX,
                0,
            ));
        }
        if self.concurrency == 0 {
            return Err(ValidationError::out_of_range("concurrency", 1, i64::MAX, 0));
        }
        Ok(())
    }

    pub fn includes(&self, experience_type: ExperienceType) -> bool {
        self.include_types.is_empty() || self.include_types.contains(&experience_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let options = TailoringOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.max_bullets, 12);
        assert!(options.includes(ExperienceType::Volunteer));
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert!(TailoringOptions::default().with_max_bullets(0).validate().is_err());
        assert!(TailoringOptions::default()
            .with_max_bullets_per_experience(Some(0))
            .validate()
            .is_err());
        assert!(TailoringOptions::default().with_concurrency(0).validate().is_err());
    }

    #[test]
    fn include_types_filters() {
        let options = TailoringOptions::default().with_include_types(vec![ExperienceType::Work]);
        assert!(options.includes(ExperienceType::Work));
        assert!(!options.includes(ExperienceType::Education));
    }

    #[test]
    fn style_parses() {
        assert_eq!("Technical".parse::<TailoringStyle>().unwrap(), TailoringStyle::Technical);
        assert!("loud".parse::<TailoringStyle>().is_err());
    }
}
