//! Profile ports - reading the candidate's library and editing experiences.

use async_trait::async_trait;

use crate::domain::{
    experience::Experience,
    foundation::{BulletId, DomainError, ExperienceId, UserId},
    profile::{CandidateProfile, Skill, SpokenLanguage},
};

/// Query operations over a user's profile and bullet library.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Get the candidate profile, `None` if the user has none.
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<CandidateProfile>, DomainError>;

    /// All experiences (with their bullets) owned by the user.
    async fn list_experiences(&self, user_id: &UserId) -> Result<Vec<Experience>, DomainError>;

    /// Skills listed by the user.
    async fn list_skills(&self, user_id: &UserId) -> Result<Vec<Skill>, DomainError>;

    /// Languages spoken by the user.
    async fn list_languages(&self, user_id: &UserId) -> Result<Vec<SpokenLanguage>, DomainError>;
}

/// Write operations on experiences.
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Save a new experience.
    async fn save(&self, experience: &Experience) -> Result<(), DomainError>;

    /// Update an existing experience, bullets included.
    ///
    /// # Errors
    ///
    /// - `ExperienceNotFound` if it doesn't exist
    async fn update(&self, experience: &Experience) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ExperienceId) -> Result<Option<Experience>, DomainError>;

    /// Find the experience owning a bullet.
    async fn find_by_bullet(&self, bullet_id: &BulletId) -> Result<Option<Experience>, DomainError>;
}
