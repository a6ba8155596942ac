//! Resume AI Port - The five tailoring capabilities.
//!
//! The orchestrator depends only on this trait. Concrete backends (an LLM
//! adapter, the scripted offline backend, the retrying decorator) are
//! swappable behind it.

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::AIError;
use crate::domain::experience::Bullet;
use crate::domain::foundation::{ResumeId, TargetLanguage, UserId};
use crate::domain::profile::{CandidateProfile, Skill};
use crate::domain::resume::{ResumeContent, ResumeError};
use crate::domain::tailoring::{
    BulletSelection, JobAnalysis, MatchResult, SummaryResult, TailoredBulletResult,
    TailoringStyle,
};

/// Port for the AI-driven tailoring steps.
///
/// Implementations may return selections containing ids outside the
/// candidate set; callers validate against the candidates they passed in.
#[async_trait]
pub trait ResumeAI: Send + Sync {
    /// Extracts skills, keywords and seniority from a job description.
    async fn analyze_job(
        &self,
        ctx: &CallContext,
        job_description: &str,
        language: &TargetLanguage,
    ) -> Result<JobAnalysis, ResumeAIError>;

    /// Picks up to `max_bullets` candidates, most relevant first.
    async fn select_bullets(
        &self,
        ctx: &CallContext,
        analysis: &JobAnalysis,
        candidates: &[Bullet],
        max_bullets: usize,
        language: &TargetLanguage,
    ) -> Result<BulletSelection, ResumeAIError>;

    /// Rewrites one bullet toward the job without inventing facts.
    async fn tailor_bullet(
        &self,
        ctx: &CallContext,
        bullet: &Bullet,
        analysis: &JobAnalysis,
        language: &TargetLanguage,
        style: TailoringStyle,
    ) -> Result<TailoredBulletResult, ResumeAIError>;

    /// Writes a 3-4 sentence professional summary.
    async fn generate_summary(
        &self,
        ctx: &CallContext,
        candidate: &CandidateProfile,
        analysis: &JobAnalysis,
        bullets: &[TailoredBulletResult],
        language: &TargetLanguage,
    ) -> Result<SummaryResult, ResumeAIError>;

    /// Scores the assembled content against the job.
    async fn score_match(
        &self,
        ctx: &CallContext,
        analysis: &JobAnalysis,
        content: &ResumeContent,
        skills: &[Skill],
    ) -> Result<MatchResult, ResumeAIError>;
}

/// Per-run context threaded through every port call.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    pub user_id: Option<UserId>,
    pub resume_id: Option<ResumeId>,
    pub trace_id: String,
    /// Cancelling aborts pending retries immediately.
    pub cancel: CancellationToken,
}

impl CallContext {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            ..Self::default()
        }
    }

    pub fn for_resume(user_id: UserId, resume_id: ResumeId, cancel: CancellationToken) -> Self {
        Self {
            user_id: Some(user_id),
            trace_id: resume_id.to_string(),
            resume_id: Some(resume_id),
            cancel,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Failures of a [`ResumeAI`] call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResumeAIError {
    /// A single provider attempt failed.
    #[error("{0}")]
    Provider(#[from] AIError),

    /// Every allowed attempt failed with a retryable error.
    #[error("max retries exceeded after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: AIError },

    /// The backend answered but the answer did not fit the schema.
    #[error("malformed {operation} output: {reason}")]
    MalformedOutput { operation: String, reason: String },

    /// The caller cancelled the run.
    #[error("cancelled")]
    Cancelled,
}

impl ResumeAIError {
    pub fn malformed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        ResumeAIError::MalformedOutput {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Only transient provider failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ResumeAIError::Provider(err) => err.is_retryable(),
            _ => false,
        }
    }
}

impl From<ResumeAIError> for ResumeError {
    fn from(err: ResumeAIError) -> Self {
        match err {
            ResumeAIError::Provider(AIError::Parse(reason)) => ResumeError::MalformedOutput(reason),
            ResumeAIError::Provider(inner) => ResumeError::ServiceUnavailable(inner.to_string()),
            err @ ResumeAIError::RetriesExhausted { .. } => {
                ResumeError::ServiceUnavailable(err.to_string())
            }
            err @ ResumeAIError::MalformedOutput { .. } => {
                ResumeError::MalformedOutput(err.to_string())
            }
            ResumeAIError::Cancelled => ResumeError::Cancelled,
        }
    }
}
