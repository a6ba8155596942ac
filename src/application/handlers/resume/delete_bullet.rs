//! DeleteBulletHandler - Command handler for deleting a bullet.
//!
//! Deletion is explicit and cascades: the bullet leaves its experience and
//! every resume of the owner that selected it.

use std::sync::Arc;

use crate::domain::experience::Bullet;
use crate::domain::foundation::{BulletId, ResumeId, UserId};
use crate::domain::resume::ResumeError;
use crate::ports::{ExperienceRepository, ResumeRepository};

/// Command to delete one bullet.
#[derive(Debug, Clone)]
pub struct DeleteBulletCommand {
    pub bullet_id: BulletId,
    pub user_id: UserId,
}

/// Result of a successful deletion.
#[derive(Debug, Clone)]
pub struct DeleteBulletResult {
    pub removed: Bullet,
    /// Resumes that referenced the bullet and were updated.
    pub affected_resumes: Vec<ResumeId>,
}

/// Handler for deleting bullets.
pub struct DeleteBulletHandler {
    experiences: Arc<dyn ExperienceRepository>,
    resumes: Arc<dyn ResumeRepository>,
}

impl DeleteBulletHandler {
    pub fn new(
        experiences: Arc<dyn ExperienceRepository>,
        resumes: Arc<dyn ResumeRepository>,
    ) -> Self {
        Self {
            experiences,
            resumes,
        }
    }

    pub async fn handle(&self, cmd: DeleteBulletCommand) -> Result<DeleteBulletResult, ResumeError> {
        // 1. Load owning experience
        let mut experience = self
            .experiences
            .find_by_bullet(&cmd.bullet_id)
            .await?
            .ok_or(ResumeError::BulletNotFound(cmd.bullet_id))?;

        // 2. Authorize - user must own the experience
        if experience.user_id() != &cmd.user_id {
            return Err(ResumeError::Forbidden);
        }

        // 3. Remove from experience
        let removed = experience
            .remove_bullet(&cmd.bullet_id)
            .ok_or(ResumeError::BulletNotFound(cmd.bullet_id))?;
        self.experiences.update(&experience).await?;

        // 4. Cascade into the owner's resumes
        let mut affected_resumes = Vec::new();
        for mut resume in self.resumes.find_by_user_id(&cmd.user_id).await? {
            if resume.remove_bullet(&cmd.bullet_id) {
                self.resumes.update(&resume).await?;
                affected_resumes.push(*resume.id());
            }
        }

        tracing::info!(
            bullet_id = %cmd.bullet_id,
            resumes = affected_resumes.len(),
            "bullet deleted"
        );
        Ok(DeleteBulletResult {
            removed,
            affected_resumes,
        })
    }
}
