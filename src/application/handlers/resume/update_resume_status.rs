//! UpdateResumeStatusHandler - Command handler for explicit status changes.

use std::sync::Arc;

use crate::domain::foundation::{ResumeId, UserId};
use crate::domain::resume::{Resume, ResumeError, ResumeStatus};
use crate::ports::ResumeRepository;

/// Command to move a resume along its lifecycle.
#[derive(Debug, Clone)]
pub struct UpdateResumeStatusCommand {
    pub resume_id: ResumeId,
    pub user_id: UserId,
    /// Raw status value as received from the caller.
    pub status: String,
}

/// Result of a successful status change.
#[derive(Debug, Clone)]
pub struct UpdateResumeStatusResult {
    pub resume: Resume,
    pub previous: ResumeStatus,
}

/// Handler for user-driven status transitions.
pub struct UpdateResumeStatusHandler {
    repository: Arc<dyn ResumeRepository>,
}

impl UpdateResumeStatusHandler {
    pub fn new(repository: Arc<dyn ResumeRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateResumeStatusCommand,
    ) -> Result<UpdateResumeStatusResult, ResumeError> {
        // 1. Parse target status
        let target: ResumeStatus = cmd.status.parse()?;

        // 2. Load resume
        let mut resume = self
            .repository
            .find_by_id(&cmd.resume_id)
            .await?
            .ok_or_else(|| ResumeError::not_found(cmd.resume_id))?;

        // 3. Authorize - user must be owner
        if !resume.is_owned_by(&cmd.user_id) {
            return Err(ResumeError::Forbidden);
        }

        // 4. Transition
        let previous = resume.status();
        resume.transition_status(target)?;

        // 5. Persist
        self.repository.update(&resume).await?;

        tracing::info!(
            resume_id = %cmd.resume_id,
            from = %previous,
            to = %target,
            "resume status changed"
        );
        Ok(UpdateResumeStatusResult { resume, previous })
    }
}
