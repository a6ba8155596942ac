//! TailorResumeHandler - Command handler for a full tailoring run.
//!
//! Loads the resume, checks ownership, runs the [`ResumeTailor`] pipeline
//! and persists the result. A failed run saves nothing.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::application::tailoring::{ResumeTailor, TailoringOutcome};
use crate::domain::foundation::{ResumeId, UserId};
use crate::domain::resume::{Resume, ResumeError};
use crate::domain::tailoring::TailoringOptions;
use crate::ports::{CallContext, ResumeRepository};

/// Command to tailor an existing resume.
#[derive(Debug, Clone)]
pub struct TailorResumeCommand {
    pub resume_id: ResumeId,
    pub user_id: UserId,
    pub options: TailoringOptions,
}

/// Result of a successful tailoring run.
#[derive(Debug, Clone)]
pub struct TailorResumeResult {
    pub resume: Resume,
    pub outcome: TailoringOutcome,
}

/// Handler for tailoring resumes.
pub struct TailorResumeHandler {
    repository: Arc<dyn ResumeRepository>,
    tailor: Arc<ResumeTailor>,
}

impl TailorResumeHandler {
    pub fn new(repository: Arc<dyn ResumeRepository>, tailor: Arc<ResumeTailor>) -> Self {
        Self { repository, tailor }
    }

    pub async fn handle(
        &self,
        cmd: TailorResumeCommand,
        cancel: CancellationToken,
    ) -> Result<TailorResumeResult, ResumeError> {
        // 1. Load resume
        let mut resume = self
            .repository
            .find_by_id(&cmd.resume_id)
            .await?
            .ok_or_else(|| ResumeError::not_found(cmd.resume_id))?;

        // 2. Authorize - user must be owner
        if !resume.is_owned_by(&cmd.user_id) {
            return Err(ResumeError::Forbidden);
        }

        // 3. Run the pipeline
        let ctx = CallContext::for_resume(cmd.user_id, cmd.resume_id, cancel);
        let outcome = match self.tailor.tailor(&ctx, &mut resume, &cmd.options).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    resume_id = %cmd.resume_id,
                    code = %err.code(),
                    error = %err,
                    "tailoring failed; resume left unchanged"
                );
                return Err(err);
            }
        };

        // 4. Persist
        self.repository.update(&resume).await?;

        Ok(TailorResumeResult { resume, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{
        LlmResumeAI, MockAIProvider, ResilientResumeAI, RetryPolicy, ScriptedResumeAI,
    };
    use crate::adapters::memory::InMemoryProfileStore;
    use crate::domain::experience::{Experience, ExperienceType};
    use crate::domain::foundation::{
        Date, DomainError, ErrorCode, ExperienceId, TargetLanguage,
    };
    use crate::domain::profile::CandidateProfile;
    use crate::domain::resume::ResumeStatus;
    use crate::ports::{AIError, ResumeAI};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct MockResumeRepository {
        resumes: Mutex<Vec<Resume>>,
        updates: Mutex<usize>,
        fail_update: bool,
    }

    impl MockResumeRepository {
        fn with_resume(resume: Resume) -> Self {
            Self {
                resumes: Mutex::new(vec![resume]),
                updates: Mutex::new(0),
                fail_update: false,
            }
        }

        fn failing_updates(resume: Resume) -> Self {
            Self {
                fail_update: true,
                ..Self::with_resume(resume)
            }
        }

        fn get_resume(&self, id: &ResumeId) -> Option<Resume> {
            self.resumes
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id() == id)
                .cloned()
        }

        fn update_count(&self) -> usize {
            *self.updates.lock().unwrap()
        }
    }

    #[async_trait]
    impl ResumeRepository for MockResumeRepository {
        async fn save(&self, resume: &Resume) -> Result<(), DomainError> {
            self.resumes.lock().unwrap().push(resume.clone());
            Ok(())
        }

        async fn update(&self, resume: &Resume) -> Result<(), DomainError> {
            if self.fail_update {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated update failure",
                ));
            }
            *self.updates.lock().unwrap() += 1;
            let mut resumes = self.resumes.lock().unwrap();
            if let Some(pos) = resumes.iter().position(|r| r.id() == resume.id()) {
                resumes[pos] = resume.clone();
            }
            Ok(())
        }

        async fn find_by_id(&self, id: &ResumeId) -> Result<Option<Resume>, DomainError> {
            Ok(self.get_resume(id))
        }

        async fn find_by_user_id(&self, _user_id: &UserId) -> Result<Vec<Resume>, DomainError> {
            Ok(vec![])
        }

        async fn delete(&self, _id: &ResumeId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn test_user_id() -> UserId {
        UserId::new("test-user-123").unwrap()
    }

    fn test_resume() -> Resume {
        Resume::new(
            ResumeId::new(),
            test_user_id(),
            "Senior Go Engineer, needs Kubernetes and PostgreSQL experience",
            TargetLanguage::english(),
        )
        .unwrap()
    }

    async fn test_profiles() -> InMemoryProfileStore {
        let store = InMemoryProfileStore::new();
        store
            .put_profile(CandidateProfile::new(test_user_id(), "Ada Lovelace").unwrap())
            .await;
        let mut experience = Experience::new(
            ExperienceId::new(),
            test_user_id(),
            ExperienceType::Work,
            "Backend Engineer",
            "Acme",
            Date::from_ymd(2019, 3, 1).unwrap(),
        )
        .unwrap();
        experience
            .add_bullet("Built Go services on PostgreSQL")
            .unwrap();
        store.put_experience(experience).await;
        store
    }

    fn handler_with(
        repo: Arc<MockResumeRepository>,
        ai: Arc<dyn ResumeAI>,
        profiles: InMemoryProfileStore,
    ) -> TailorResumeHandler {
        TailorResumeHandler::new(repo, Arc::new(ResumeTailor::new(ai, Arc::new(profiles))))
    }

    fn cmd(resume_id: ResumeId) -> TailorResumeCommand {
        TailorResumeCommand {
            resume_id,
            user_id: test_user_id(),
            options: TailoringOptions::default(),
        }
    }

    #[tokio::test]
    async fn tailors_and_persists_resume() {
        let resume = test_resume();
        let resume_id = *resume.id();
        let repo = Arc::new(MockResumeRepository::with_resume(resume));
        let handler = handler_with(repo.clone(), Arc::new(ScriptedResumeAI), test_profiles().await);

        let result = handler
            .handle(cmd(resume_id), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.resume.status(), ResumeStatus::Generated);
        assert_eq!(repo.update_count(), 1);
        let stored = repo.get_resume(&resume_id).unwrap();
        assert_eq!(stored.selected_bullets().len(), 1);
        assert!(stored.content().is_some());
    }

    #[tokio::test]
    async fn fails_when_resume_not_found() {
        let repo = Arc::new(MockResumeRepository::with_resume(test_resume()));
        let handler = handler_with(repo.clone(), Arc::new(ScriptedResumeAI), test_profiles().await);

        let result = handler
            .handle(cmd(ResumeId::new()), CancellationToken::new())
            .await;

        assert!(matches!(result, Err(ResumeError::NotFound(_))));
        assert_eq!(repo.update_count(), 0);
    }

    #[tokio::test]
    async fn fails_when_not_owner() {
        let resume = test_resume();
        let resume_id = *resume.id();
        let repo = Arc::new(MockResumeRepository::with_resume(resume));
        let handler = handler_with(repo.clone(), Arc::new(ScriptedResumeAI), test_profiles().await);

        let mut command = cmd(resume_id);
        command.user_id = UserId::new("other-user").unwrap();

        let result = handler.handle(command, CancellationToken::new()).await;
        assert!(matches!(result, Err(ResumeError::Forbidden)));
        assert_eq!(repo.update_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_backend_saves_nothing() {
        let resume = test_resume();
        let resume_id = *resume.id();
        let repo = Arc::new(MockResumeRepository::with_resume(resume.clone()));
        let provider = Arc::new(MockAIProvider::always_failing(AIError::unavailable(
            "backend down",
        )));
        let ai = ResilientResumeAI::new(LlmResumeAI::new(provider.clone()))
            .with_policy(RetryPolicy::new(3, Duration::from_millis(100)));
        let handler = handler_with(repo.clone(), Arc::new(ai), test_profiles().await);

        let err = handler
            .handle(cmd(resume_id), CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ResumeError::ServiceUnavailable(_)));
        assert_eq!(provider.call_count(), 4);
        assert_eq!(repo.update_count(), 0);
        assert_eq!(repo.get_resume(&resume_id).unwrap(), resume);
    }

    #[tokio::test]
    async fn surfaces_update_failure() {
        let resume = test_resume();
        let resume_id = *resume.id();
        let repo = Arc::new(MockResumeRepository::failing_updates(resume));
        let handler = handler_with(repo.clone(), Arc::new(ScriptedResumeAI), test_profiles().await);

        let result = handler.handle(cmd(resume_id), CancellationToken::new()).await;
        assert!(matches!(result, Err(ResumeError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn cancelled_token_aborts_run() {
        let resume = test_resume();
        let resume_id = *resume.id();
        let repo = Arc::new(MockResumeRepository::with_resume(resume));
        let handler = handler_with(repo.clone(), Arc::new(ScriptedResumeAI), test_profiles().await);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = handler.handle(cmd(resume_id), cancel).await;
        assert_eq!(result.unwrap_err(), ResumeError::Cancelled);
        assert_eq!(repo.update_count(), 0);
    }
}
