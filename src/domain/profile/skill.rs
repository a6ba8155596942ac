//! Skill - a named capability with a bounded proficiency.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProficiencyLevel, SkillId, UserId, ValidationError};

/// A skill the candidate lists on their profile.
///
/// Skills feed the scoring step; the tailoring pipeline never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    id: SkillId,
    user_id: UserId,
    name: String,
    category: Option<String>,
    proficiency: ProficiencyLevel,
    years_of_experience: Option<u32>,
}

impl Skill {
    pub fn new(
        id: SkillId,
        user_id: UserId,
        name: impl Into<String>,
        proficiency: ProficiencyLevel,
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
            category: None,
            proficiency,
            years_of_experience: None,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = Some(category.trim().to_string()).filter(|c| !c.is_empty());
        self
    }

    pub fn with_years(mut self, years: u32) -> Self {
        self.years_of_experience = Some(years);
        self
    }

    pub fn id(&self) -> &SkillId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn proficiency(&self) -> ProficiencyLevel {
        self.proficiency
    }

    pub fn years_of_experience(&self) -> Option<u32> {
        self.years_of_experience
    }

    /// Case-insensitive name comparison.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}
