//! In-memory profile store.
//!
//! Implements both [`ProfileReader`] and [`ExperienceRepository`] over one
//! shared state, so edits are immediately visible to readers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::experience::Experience;
use crate::domain::foundation::{BulletId, DomainError, ErrorCode, ExperienceId, UserId};
use crate::domain::profile::{CandidateProfile, Skill, SpokenLanguage};
use crate::ports::{ExperienceRepository, ProfileReader};

#[derive(Debug, Default)]
struct ProfileState {
    profiles: HashMap<UserId, CandidateProfile>,
    experiences: HashMap<ExperienceId, Experience>,
    skills: HashMap<UserId, Vec<Skill>>,
    languages: HashMap<UserId, Vec<SpokenLanguage>>,
}

/// Profile, experience and skill storage for tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    state: Arc<RwLock<ProfileState>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_profile(&self, profile: CandidateProfile) {
        self.state
            .write()
            .await
            .profiles
            .insert(profile.user_id().clone(), profile);
    }

    /// Inserts or replaces an experience.
    pub async fn put_experience(&self, experience: Experience) {
        self.state
            .write()
            .await
            .experiences
            .insert(*experience.id(), experience);
    }

    pub async fn put_skill(&self, skill: Skill) {
        self.state
            .write()
            .await
            .skills
            .entry(skill.user_id().clone())
            .or_default()
            .push(skill);
    }

    pub async fn put_language(&self, language: SpokenLanguage) {
        self.state
            .write()
            .await
            .languages
            .entry(language.user_id().clone())
            .or_default()
            .push(language);
    }
}

#[async_trait]
impl ProfileReader for InMemoryProfileStore {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<CandidateProfile>, DomainError> {
        Ok(self.state.read().await.profiles.get(user_id).cloned())
    }

    async fn list_experiences(&self, user_id: &UserId) -> Result<Vec<Experience>, DomainError> {
        let state = self.state.read().await;
        let mut experiences: Vec<Experience> = state
            .experiences
            .values()
            .filter(|e| e.user_id() == user_id)
            .cloned()
            .collect();
        // map order is arbitrary; keep reads stable
        experiences.sort_by(|a, b| {
            a.display_order()
                .cmp(&b.display_order())
                .then_with(|| b.start_date().cmp(&a.start_date()))
                .then_with(|| a.id().to_string().cmp(&b.id().to_string()))
        });
        Ok(experiences)
    }

    async fn list_skills(&self, user_id: &UserId) -> Result<Vec<Skill>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .skills
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_languages(&self, user_id: &UserId) -> Result<Vec<SpokenLanguage>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .languages
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ExperienceRepository for InMemoryProfileStore {
    async fn save(&self, experience: &Experience) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.experiences.contains_key(experience.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Experience already exists: {}", experience.id()),
            ));
        }
        state.experiences.insert(*experience.id(), experience.clone());
        Ok(())
    }

    async fn update(&self, experience: &Experience) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.experiences.get_mut(experience.id()) {
            Some(stored) => {
                *stored = experience.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ExperienceNotFound,
                format!("Experience not found: {}", experience.id()),
            )
            .with_detail("experience_id", experience.id().to_string())),
        }
    }

    async fn find_by_id(&self, id: &ExperienceId) -> Result<Option<Experience>, DomainError> {
        Ok(self.state.read().await.experiences.get(id).cloned())
    }

    async fn find_by_bullet(&self, bullet_id: &BulletId) -> Result<Option<Experience>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .experiences
            .values()
            .find(|e| e.bullet(bullet_id).is_some())
            .cloned())
    }
}
