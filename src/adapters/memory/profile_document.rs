//! JSON profile documents.
//!
//! The CLI reads a candidate's whole library from one JSON file and seeds
//! an [`InMemoryProfileStore`] from it.
//!
//! ```json
//! {
//!   "user_id": "ada",
//!   "full_name": "Ada Lovelace",
//!   "skills": [{ "name": "Go", "proficiency": 90 }],
//!   "experiences": [{
//!     "type": "work", "title": "Backend Engineer", "organization": "Acme",
//!     "start_date": "2020-01-01",
//!     "bullets": [{ "content": "Built Go services on PostgreSQL", "impact_score": 80 }]
//!   }]
//! }
//! ```

use serde::Deserialize;

use super::InMemoryProfileStore;
use crate::domain::experience::{Experience, ExperienceType};
use crate::domain::foundation::{
    Date, ExperienceId, ImpactScore, LanguageId, ProficiencyLevel, SkillId, UserId,
    ValidationError,
};
use crate::domain::profile::{CandidateProfile, LanguageProficiency, Skill, SpokenLanguage};

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDocument {
    pub user_id: String,
    pub full_name: String,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub languages: Vec<LanguageEntry>,
    #[serde(default)]
    pub experiences: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    #[serde(default)]
    pub proficiency: i64,
    pub category: Option<String>,
    pub years: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub proficiency: LanguageProficiency,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceEntry {
    #[serde(rename = "type", default)]
    pub experience_type: ExperienceType,
    pub title: String,
    pub organization: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
    #[serde(default)]
    pub bullets: Vec<BulletEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulletEntry {
    pub content: String,
    pub impact_score: Option<i64>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ProfileDocument {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validates every entry, then writes the whole profile into `store`.
    ///
    /// Nothing is written if any entry is invalid.
    pub async fn seed(&self, store: &InMemoryProfileStore) -> Result<UserId, ValidationError> {
        let user_id = UserId::new(self.user_id.as_str())?;

        let mut profile = CandidateProfile::new(user_id.clone(), self.full_name.as_str())?;
        if let Some(headline) = &self.headline {
            profile = profile.with_headline(headline.as_str());
        }
        if let Some(location) = &self.location {
            profile = profile.with_location(location.as_str());
        }
        if let Some(email) = &self.email {
            profile = profile.with_email(email.as_str())?;
        }
        if let Some(years) = self.years_of_experience {
            profile = profile.with_years_of_experience(years);
        }

        let skills = self
            .skills
            .iter()
            .map(|entry| entry.to_skill(&user_id))
            .collect::<Result<Vec<_>, _>>()?;
        let languages = self
            .languages
            .iter()
            .map(|entry| {
                SpokenLanguage::new(
                    LanguageId::new(),
                    user_id.clone(),
                    entry.name.as_str(),
                    entry.proficiency,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        let experiences = self
            .experiences
            .iter()
            .enumerate()
            .map(|(order, entry)| entry.to_experience(&user_id, order as u32))
            .collect::<Result<Vec<_>, _>>()?;

        store.put_profile(profile).await;
        for skill in skills {
            store.put_skill(skill).await;
        }
        for language in languages {
            store.put_language(language).await;
        }
        for experience in experiences {
            store.put_experience(experience).await;
        }
        Ok(user_id)
    }
}

impl SkillEntry {
    fn to_skill(&self, user_id: &UserId) -> Result<Skill, ValidationError> {
        let mut skill = Skill::new(
            SkillId::new(),
            user_id.clone(),
            self.name.as_str(),
            ProficiencyLevel::new(self.proficiency)?,
        )?;
        if let Some(category) = &self.category {
            skill = skill.with_category(category.as_str());
        }
        if let Some(years) = self.years {
            skill = skill.with_years(years);
        }
        Ok(skill)
    }
}

impl ExperienceEntry {
    fn to_experience(&self, user_id: &UserId, order: u32) -> Result<Experience, ValidationError> {
        let start = Date::parse_field("start_date", &self.start_date)?;
        let end = self
            .end_date
            .as_deref()
            .map(|value| Date::parse_field("end_date", value))
            .transpose()?;

        let mut experience = Experience::new(
            ExperienceId::new(),
            user_id.clone(),
            self.experience_type,
            self.title.as_str(),
            self.organization.as_str(),
            start,
        )?;
        experience.set_dates(start, end, self.current || end.is_none())?;
        experience.set_location(self.location.clone());
        experience.set_description(self.description.clone());
        experience.set_display_order(order);

        for entry in &self.bullets {
            let id = *experience.add_bullet(entry.content.as_str())?.id();
            if let Some(bullet) = experience.bullet_mut(&id) {
                if let Some(score) = entry.impact_score {
                    bullet.set_impact_score(ImpactScore::new(score)?);
                }
                bullet.set_keywords(entry.keywords.iter().map(String::as_str));
            }
        }
        Ok(experience)
    }
}
