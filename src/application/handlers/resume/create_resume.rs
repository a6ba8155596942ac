//! CreateResumeHandler - Command handler for starting a new resume.

use std::sync::Arc;

use crate::domain::foundation::{ResumeId, TargetLanguage, UserId};
use crate::domain::resume::{Resume, ResumeError};
use crate::ports::ResumeRepository;

/// Command to create a draft resume for one job application.
#[derive(Debug, Clone)]
pub struct CreateResumeCommand {
    pub user_id: UserId,
    pub job_description: String,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub job_url: Option<String>,
    /// ISO-639-1 code; English when absent.
    pub target_language: Option<String>,
}

impl CreateResumeCommand {
    pub fn new(user_id: UserId, job_description: impl Into<String>) -> Self {
        Self {
            user_id,
            job_description: job_description.into(),
            job_title: None,
            company: None,
            job_url: None,
            target_language: None,
        }
    }
}

/// Result of successful resume creation.
#[derive(Debug, Clone)]
pub struct CreateResumeResult {
    pub resume: Resume,
}

/// Handler for creating resumes.
pub struct CreateResumeHandler {
    repository: Arc<dyn ResumeRepository>,
}

impl CreateResumeHandler {
    pub fn new(repository: Arc<dyn ResumeRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateResumeCommand) -> Result<CreateResumeResult, ResumeError> {
        // 1. Resolve language
        let language = match cmd.target_language.as_deref() {
            Some(code) => TargetLanguage::new(code)?,
            None => TargetLanguage::default(),
        };

        // 2. Create draft
        let mut resume = Resume::new(ResumeId::new(), cmd.user_id, cmd.job_description, language)?;
        if cmd.job_title.is_some() || cmd.company.is_some() || cmd.job_url.is_some() {
            resume.set_job_details(cmd.job_title, cmd.company, cmd.job_url);
        }

        // 3. Persist
        self.repository.save(&resume).await?;

        tracing::info!(resume_id = %resume.id(), user_id = %resume.user_id(), "resume created");
        Ok(CreateResumeResult { resume })
    }
}
