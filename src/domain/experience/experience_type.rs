//! Category of an experience entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Kind of experience an entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceType {
    #[default]
    Work,
    Education,
    Project,
    Volunteer,
    Certification,
    Other,
}

impl ExperienceType {
    /// All variants, in display order.
    pub const ALL: [ExperienceType; 6] = [
        ExperienceType::Work,
        ExperienceType::Education,
        ExperienceType::Project,
        ExperienceType::Volunteer,
        ExperienceType::Certification,
        ExperienceType::Other,
    ];

    /// Returns the snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceType::Work => "work",
            ExperienceType::Education => "education",
            ExperienceType::Project => "project",
            ExperienceType::Volunteer => "volunteer",
            ExperienceType::Certification => "certification",
            ExperienceType::Other => "other",
        }
    }
}

impl fmt::Display for ExperienceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExperienceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "experience_type",
                    format!("unknown experience type '{}'", s),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Work".parse::<ExperienceType>().unwrap(), ExperienceType::Work);
        assert_eq!(
            " certification ".parse::<ExperienceType>().unwrap(),
            ExperienceType::Certification
        );
        assert!("job".parse::<ExperienceType>().is_err());
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ExperienceType::Volunteer).unwrap(),
            "\"volunteer\""
        );
    }
}
