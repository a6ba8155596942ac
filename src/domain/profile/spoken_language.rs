//! Spoken language with an enumerated proficiency tier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{LanguageId, UserId, ValidationError};

/// Proficiency tiers, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageProficiency {
    Native,
    Fluent,
    Professional,
    Conversational,
    Basic,
}

impl LanguageProficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageProficiency::Native => "native",
            LanguageProficiency::Fluent => "fluent",
            LanguageProficiency::Professional => "professional",
            LanguageProficiency::Conversational => "conversational",
            LanguageProficiency::Basic => "basic",
        }
    }

    /// True for tiers usable in a work setting.
    pub fn is_working_proficiency(&self) -> bool {
        *self <= LanguageProficiency::Professional
    }
}

impl fmt::Display for LanguageProficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageProficiency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(LanguageProficiency::Native),
            "fluent" => Ok(LanguageProficiency::Fluent),
            "professional" => Ok(LanguageProficiency::Professional),
            "conversational" => Ok(LanguageProficiency::Conversational),
            "basic" => Ok(LanguageProficiency::Basic),
            _ => Err(ValidationError::invalid_format(
                "proficiency",
                format!("unknown language proficiency '{}'", s),
            )),
        }
    }
}

/// A language the candidate speaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    id: LanguageId,
    user_id: UserId,
    name: String,
    proficiency: LanguageProficiency,
}

impl SpokenLanguage {
    pub fn new(
        id: LanguageId,
        user_id: UserId,
        name: impl Into<String>,
        proficiency: LanguageProficiency,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            user_id,
            name: name.to_string(),
            proficiency,
        })
    }

    pub fn id(&self) -> &LanguageId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn proficiency(&self) -> LanguageProficiency {
        self.proficiency
    }
}
