//! Retrying ResumeAI decorator.
//!
//! Wraps any [`ResumeAI`] backend and applies a [`RetryPolicy`] to each of
//! its five operations. Only transient provider failures are retried;
//! malformed output and cancellation pass straight through.
//!
//! # Example
//!
//! ```ignore
//! let backend = LlmResumeAI::new(Arc::new(AnthropicProvider::new(config)?));
//! let ai = ResilientResumeAI::new(backend).with_policy(RetryPolicy::new(3, Duration::from_secs(1)));
//! ```

use async_trait::async_trait;

use super::retry::{call_with_retry, RetryPolicy};
use crate::domain::experience::Bullet;
use crate::domain::foundation::TargetLanguage;
use crate::domain::profile::{CandidateProfile, Skill};
use crate::domain::resume::ResumeContent;
use crate::domain::tailoring::{
    BulletSelection, JobAnalysis, MatchResult, SummaryResult, TailoredBulletResult,
    TailoringStyle,
};
use crate::ports::{CallContext, ResumeAI, ResumeAIError};

/// ResumeAI wrapper with exponential-backoff retries.
pub struct ResilientResumeAI<A: ResumeAI> {
    inner: A,
    policy: RetryPolicy,
}

impl<A: ResumeAI> ResilientResumeAI<A> {
    /// Wraps `inner` with the default policy (3 retries, 1s base delay).
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

#[async_trait]
impl<A: ResumeAI> ResumeAI for ResilientResumeAI<A> {
    async fn analyze_job(
        &self,
        ctx: &CallContext,
        job_description: &str,
        language: &TargetLanguage,
    ) -> Result<JobAnalysis, ResumeAIError> {
        call_with_retry(&self.policy, &ctx.cancel, "analyze_job", move || {
            self.inner.analyze_job(ctx, job_description, language)
        })
        .await
    }

    async fn select_bullets(
        &self,
        ctx: &CallContext,
        analysis: &JobAnalysis,
        candidates: &[Bullet],
        max_bullets: usize,
        language: &TargetLanguage,
    ) -> Result<BulletSelection, ResumeAIError> {
        call_with_retry(&self.policy, &ctx.cancel, "select_bullets", move || {
            self.inner
                .select_bullets(ctx, analysis, candidates, max_bullets, language)
        })
        .await
    }

    async fn tailor_bullet(
        &self,
        ctx: &CallContext,
        bullet: &Bullet,
        analysis: &JobAnalysis,
        language: &TargetLanguage,
        style: TailoringStyle,
    ) -> Result<TailoredBulletResult, ResumeAIError> {
        call_with_retry(&self.policy, &ctx.cancel, "tailor_bullet", move || {
            self.inner
                .tailor_bullet(ctx, bullet, analysis, language, style)
        })
        .await
    }

    async fn generate_summary(
        &self,
        ctx: &CallContext,
        candidate: &CandidateProfile,
        analysis: &JobAnalysis,
        bullets: &[TailoredBulletResult],
        language: &TargetLanguage,
    ) -> Result<SummaryResult, ResumeAIError> {
        call_with_retry(&self.policy, &ctx.cancel, "generate_summary", move || {
            self.inner
                .generate_summary(ctx, candidate, analysis, bullets, language)
        })
        .await
    }

    async fn score_match(
        &self,
        ctx: &CallContext,
        analysis: &JobAnalysis,
        content: &ResumeContent,
        skills: &[Skill],
    ) -> Result<MatchResult, ResumeAIError> {
        call_with_retry(&self.policy, &ctx.cancel, "score_match", move || {
            self.inner.score_match(ctx, analysis, content, skills)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{LlmResumeAI, MockAIProvider};
    use crate::domain::foundation::MatchScore;
    use crate::ports::AIError;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn analysis() -> JobAnalysis {
        JobAnalysis {
            title: "Backend Engineer".to_string(),
            required_skills: vec!["Go".to_string()],
            ..JobAnalysis::default()
        }
    }

    fn resilient(provider: MockAIProvider) -> ResilientResumeAI<LlmResumeAI> {
        ResilientResumeAI::new(LlmResumeAI::new(Arc::new(provider)))
            .with_policy(RetryPolicy::new(3, Duration::from_secs(1)))
    }

    #[tokio::test(start_paused = true)]
    async fn score_succeeds_after_two_rate_limits() {
        let provider = MockAIProvider::new()
            .with_error(AIError::rate_limited(1))
            .with_error(AIError::rate_limited(1))
            .with_response(r#"{"score": 85}"#);
        let ai = resilient(provider.clone());

        let result = ai
            .score_match(
                &CallContext::default(),
                &analysis(),
                &ResumeContent::new("", vec![]),
                &[],
            )
            .await
            .unwrap();

        assert_eq!(result.score, MatchScore::new(85).unwrap());
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_outage_exhausts_retries() {
        let provider = MockAIProvider::always_failing(AIError::unavailable("503"));
        let ai = resilient(provider.clone());

        let err = ai
            .analyze_job(&CallContext::default(), "Go developer", &TargetLanguage::english())
            .await
            .unwrap_err();

        assert_eq!(provider.call_count(), 4);
        assert!(matches!(
            err,
            ResumeAIError::RetriesExhausted { attempts: 4, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_output_is_returned_without_retry() {
        let provider = MockAIProvider::new().with_fallback(crate::adapters::ai::MockResponse::text(
            "I am unable to score this resume.",
        ));
        let ai = resilient(provider.clone());

        let err = ai
            .score_match(
                &CallContext::default(),
                &analysis(),
                &ResumeContent::new("", vec![]),
                &[],
            )
            .await
            .unwrap_err();

        assert_eq!(provider.call_count(), 1);
        assert!(matches!(err, ResumeAIError::MalformedOutput { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_context_short_circuits() {
        let provider = MockAIProvider::new().with_response(r#"{"score": 85}"#);
        let ai = resilient(provider.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = ai
            .score_match(
                &CallContext::new(cancel),
                &analysis(),
                &ResumeContent::new("", vec![]),
                &[],
            )
            .await
            .unwrap_err();

        assert_eq!(err, ResumeAIError::Cancelled);
        assert_eq!(provider.call_count(), 0);
    }
}
