//! LLM-backed ResumeAI implementation.
//!
//! Renders a prompt per operation, sends it through an [`AIProvider`], and
//! decodes the free-text answer into a private DTO before validating it
//! into domain types. Nothing the model returns is trusted as-is.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

use super::json_extraction::parse_json_response;
use super::prompts;
use crate::domain::experience::Bullet;
use crate::domain::foundation::{BulletId, MatchScore, TargetLanguage, ValidationError};
use crate::domain::profile::{CandidateProfile, Skill};
use crate::domain::resume::{ResumeAnalysis, ResumeContent, ScoreBreakdown};
use crate::domain::tailoring::{
    BulletSelection, JobAnalysis, MatchResult, SeniorityLevel, SummaryResult,
    TailoredBulletResult, TailoringStyle,
};
use crate::ports::{
    AIError, AIProvider, CallContext, CompletionRequest, FinishReason, MessageRole, RequestMetadata,
    ResumeAI, ResumeAIError,
};

const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Resume AI driven by a text-completion provider.
pub struct LlmResumeAI {
    provider: Arc<dyn AIProvider>,
    max_tokens: u32,
    temperature: f32,
}

impl LlmResumeAI {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn metadata(&self, ctx: &CallContext, operation: &str) -> RequestMetadata {
        let mut metadata = RequestMetadata::new(operation, ctx.trace_id.clone());
        if let Some(user_id) = &ctx.user_id {
            metadata = metadata.with_user(user_id.clone());
        }
        if let Some(resume_id) = ctx.resume_id {
            metadata = metadata.with_resume(resume_id);
        }
        metadata
    }

    /// Sends one prompt and decodes the answer into `T`.
    async fn complete_json<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        operation: &str,
        prompt: String,
    ) -> Result<T, ResumeAIError> {
        let info = self.provider.provider_info();
        let estimated = self
            .provider
            .estimate_tokens(prompts::SYSTEM_PROMPT)
            .saturating_add(self.provider.estimate_tokens(&prompt))
            .saturating_add(self.max_tokens);
        if estimated > info.max_context_tokens {
            return Err(AIError::context_too_long(estimated, info.max_context_tokens).into());
        }
        tracing::debug!(operation, provider = %info.name, estimated_tokens = estimated, "AI request");

        let request = CompletionRequest::new(self.metadata(ctx, operation))
            .with_system_prompt(prompts::SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        let response = self.provider.complete(request).await?;
        if response.finish_reason == FinishReason::Length {
            tracing::warn!(operation, "AI response truncated at max_tokens");
        }

        parse_json_response(&response.content).map_err(|e| {
            tracing::warn!(
                operation,
                error = %e,
                response_len = response.content.len(),
                "AI response could not be decoded"
            );
            ResumeAIError::malformed(operation, e.to_string())
        })
    }
}

fn invalid(operation: &str) -> impl Fn(ValidationError) -> ResumeAIError + '_ {
    move |e| ResumeAIError::malformed(operation, e.to_string())
}

// Wire shapes of the model's answers.

#[derive(Debug, Deserialize)]
struct AnalysisDto {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    required_skills: Vec<String>,
    #[serde(default)]
    preferred_skills: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    seniority: Option<String>,
    #[serde(default)]
    years_of_experience: Option<f64>,
    #[serde(default)]
    summary: String,
}

fn clean_terms(terms: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for term in terms {
        let term = term.trim();
        if !term.is_empty() && !cleaned.iter().any(|t| t.eq_ignore_ascii_case(term)) {
            cleaned.push(term.to_string());
        }
    }
    cleaned
}

impl AnalysisDto {
    fn into_domain(self) -> Result<JobAnalysis, ResumeAIError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ResumeAIError::malformed("analyze_job", "missing title"));
        }
        let seniority = self
            .seniority
            .as_deref()
            .map(SeniorityLevel::from_reported)
            .filter(|s| *s != SeniorityLevel::Unknown)
            .unwrap_or_else(|| SeniorityLevel::from_title(&title));

        Ok(JobAnalysis {
            title,
            company: self
                .company
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            required_skills: clean_terms(self.required_skills),
            preferred_skills: clean_terms(self.preferred_skills),
            keywords: clean_terms(self.keywords),
            seniority,
            years_of_experience: self
                .years_of_experience
                .filter(|y| y.is_finite() && *y >= 0.0)
                .map(|y| y.round() as u32),
            summary: self.summary.trim().to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SelectionDto {
    bullet_ids: Vec<String>,
    #[serde(default)]
    reasoning: String,
}

#[derive(Debug, Deserialize)]
struct TailorDto {
    tailored_content: String,
    #[serde(default)]
    keywords_used: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryDto {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct BreakdownDto {
    skills: f64,
    experience: f64,
    seniority: f64,
    keywords: f64,
}

#[derive(Debug, Deserialize)]
struct ScoreDto {
    score: f64,
    #[serde(default)]
    breakdown: Option<BreakdownDto>,
    #[serde(default)]
    matched_keywords: Vec<String>,
    #[serde(default)]
    missing_keywords: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

impl ScoreDto {
    fn into_domain(self) -> Result<MatchResult, ResumeAIError> {
        let to_score = |value: f64| MatchScore::from_reported(value).map_err(invalid("score_match"));

        let score = to_score(self.score)?;
        let breakdown = match self.breakdown {
            Some(b) => Some(ScoreBreakdown {
                skills: to_score(b.skills)?,
                experience: to_score(b.experience)?,
                seniority: to_score(b.seniority)?,
                keywords: to_score(b.keywords)?,
            }),
            None => None,
        };

        Ok(MatchResult::new(score).with_analysis(ResumeAnalysis {
            matched_keywords: clean_terms(self.matched_keywords),
            missing_keywords: clean_terms(self.missing_keywords),
            recommendations: clean_terms(self.recommendations),
            breakdown,
        }))
    }
}

#[async_trait]
impl ResumeAI for LlmResumeAI {
    async fn analyze_job(
        &self,
        ctx: &CallContext,
        job_description: &str,
        language: &TargetLanguage,
    ) -> Result<JobAnalysis, ResumeAIError> {
        let dto: AnalysisDto = self
            .complete_json(
                ctx,
                "analyze_job",
                prompts::analyze_job_prompt(job_description, language),
            )
            .await?;
        dto.into_domain()
    }

    async fn select_bullets(
        &self,
        ctx: &CallContext,
        analysis: &JobAnalysis,
        candidates: &[Bullet],
        max_bullets: usize,
        language: &TargetLanguage,
    ) -> Result<BulletSelection, ResumeAIError> {
        let dto: SelectionDto = self
            .complete_json(
                ctx,
                "select_bullets",
                prompts::select_bullets_prompt(analysis, candidates, max_bullets, language),
            )
            .await?;

        let ids: Vec<BulletId> = dto
            .bullet_ids
            .iter()
            .filter_map(|raw| match raw.trim().parse::<BulletId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::debug!(raw_id = %raw, "dropping unparseable bullet id");
                    None
                }
            })
            .collect();

        Ok(BulletSelection::new(ids, dto.reasoning.trim()))
    }

    async fn tailor_bullet(
        &self,
        ctx: &CallContext,
        bullet: &Bullet,
        analysis: &JobAnalysis,
        language: &TargetLanguage,
        style: TailoringStyle,
    ) -> Result<TailoredBulletResult, ResumeAIError> {
        let dto: TailorDto = self
            .complete_json(
                ctx,
                "tailor_bullet",
                prompts::tailor_bullet_prompt(bullet, analysis, language, style),
            )
            .await?;

        TailoredBulletResult::new(*bullet.id(), dto.tailored_content, dto.keywords_used)
            .map_err(invalid("tailor_bullet"))
    }

    async fn generate_summary(
        &self,
        ctx: &CallContext,
        candidate: &CandidateProfile,
        analysis: &JobAnalysis,
        bullets: &[TailoredBulletResult],
        language: &TargetLanguage,
    ) -> Result<SummaryResult, ResumeAIError> {
        let dto: SummaryDto = self
            .complete_json(
                ctx,
                "generate_summary",
                prompts::summary_prompt(candidate, analysis, bullets, language),
            )
            .await?;

        SummaryResult::new(dto.summary).map_err(invalid("generate_summary"))
    }

    async fn score_match(
        &self,
        ctx: &CallContext,
        analysis: &JobAnalysis,
        content: &ResumeContent,
        skills: &[Skill],
    ) -> Result<MatchResult, ResumeAIError> {
        let dto: ScoreDto = self
            .complete_json(
                ctx,
                "score_match",
                prompts::score_match_prompt(analysis, content, skills),
            )
            .await?;
        dto.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::foundation::{ExperienceId, ResumeId, UserId};
    use crate::ports::{AIError, ProviderInfo};
    use tokio_util::sync::CancellationToken;

    fn ai(provider: &MockAIProvider) -> LlmResumeAI {
        LlmResumeAI::new(Arc::new(provider.clone()))
    }

    fn analysis() -> JobAnalysis {
        JobAnalysis {
            title: "Backend Engineer".to_string(),
            required_skills: vec!["Go".to_string()],
            ..JobAnalysis::default()
        }
    }

    fn bullet(content: &str) -> Bullet {
        Bullet::new(BulletId::new(), ExperienceId::new(), content, 0).unwrap()
    }

    #[tokio::test]
    async fn analysis_decodes_fenced_json() {
        let provider = MockAIProvider::new().with_response(
            "Here is the analysis:\n```json\n{\"title\":\"Senior Go Engineer\",\"required_skills\":[\"Go\",\"PostgreSQL\",\"go\"],\"keywords\":[\"microservices\"],\"seniority\":\"Senior\",\"years_of_experience\":5}\n```",
        );

        let analysis = ai(&provider)
            .analyze_job(&CallContext::default(), "We need Go", &TargetLanguage::english())
            .await
            .unwrap();

        assert_eq!(analysis.title, "Senior Go Engineer");
        assert_eq!(analysis.required_skills, vec!["Go", "PostgreSQL"]);
        assert_eq!(analysis.seniority, SeniorityLevel::Senior);
        assert_eq!(analysis.years_of_experience, Some(5));
    }

    #[tokio::test]
    async fn analysis_without_title_is_malformed() {
        let provider = MockAIProvider::new().with_response(r#"{"required_skills":["Go"]}"#);

        let err = ai(&provider)
            .analyze_job(&CallContext::default(), "We need Go", &TargetLanguage::english())
            .await
            .unwrap_err();

        assert!(matches!(err, ResumeAIError::MalformedOutput { .. }));
    }

    #[tokio::test]
    async fn unknown_seniority_falls_back_to_title() {
        let provider =
            MockAIProvider::new().with_response(r#"{"title":"Staff Engineer","seniority":"n/a"}"#);

        let analysis = ai(&provider)
            .analyze_job(&CallContext::default(), "...", &TargetLanguage::english())
            .await
            .unwrap();

        assert_eq!(analysis.seniority, SeniorityLevel::Principal);
    }

    #[tokio::test]
    async fn selection_keeps_parseable_ids_in_order() {
        let a = bullet("Built Go services");
        let b = bullet("Tuned PostgreSQL");
        let foreign = BulletId::new();
        let provider = MockAIProvider::new().with_response(format!(
            r#"{{"bullet_ids":["{}","not-an-id","{}","{}"],"reasoning":"skills first"}}"#,
            b.id(),
            foreign,
            a.id()
        ));

        let selection = ai(&provider)
            .select_bullets(
                &CallContext::default(),
                &analysis(),
                &[a.clone(), b.clone()],
                5,
                &TargetLanguage::english(),
            )
            .await
            .unwrap();

        assert_eq!(selection.bullet_ids(), &[*b.id(), foreign, *a.id()]);
        assert_eq!(selection.reasoning(), "skills first");
    }

    #[tokio::test]
    async fn tailored_bullet_keeps_source_id_and_caps_keywords() {
        let source = bullet("Built services");
        let provider = MockAIProvider::new().with_response(
            r#"{"tailored_content":"Built Go microservices serving 10k rps","keywords_used":["Go","microservices","gRPC","Kafka","AWS","Docker"]}"#,
        );

        let tailored = ai(&provider)
            .tailor_bullet(
                &CallContext::default(),
                &source,
                &analysis(),
                &TargetLanguage::english(),
                TailoringStyle::Technical,
            )
            .await
            .unwrap();

        assert_eq!(tailored.bullet_id(), source.id());
        assert_eq!(tailored.keywords_used().len(), 5);
    }

    #[tokio::test]
    async fn empty_summary_is_malformed() {
        let provider = MockAIProvider::new().with_response(r#"{"summary":"   "}"#);
        let candidate = CandidateProfile::new(UserId::new("u").unwrap(), "Ada").unwrap();

        let err = ai(&provider)
            .generate_summary(
                &CallContext::default(),
                &candidate,
                &analysis(),
                &[],
                &TargetLanguage::english(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ResumeAIError::MalformedOutput { .. }));
    }

    #[tokio::test]
    async fn score_rounds_fractions_and_keeps_breakdown() {
        let provider = MockAIProvider::new().with_response(
            r#"Reasoning first. {"score": 84.6, "breakdown": {"skills": 90, "experience": 80, "seniority": 75, "keywords": 85}, "missing_keywords": ["Kubernetes"]}"#,
        );

        let result = ai(&provider)
            .score_match(
                &CallContext::default(),
                &analysis(),
                &ResumeContent::new("", vec![]),
                &[],
            )
            .await
            .unwrap();

        assert_eq!(result.score.value(), 85);
        let analysis = result.analysis.unwrap();
        assert_eq!(analysis.missing_keywords, vec!["Kubernetes"]);
        assert_eq!(analysis.breakdown.unwrap().skills.value(), 90);
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected_not_clamped() {
        let provider = MockAIProvider::new().with_response(r#"{"score": 140}"#);

        let err = ai(&provider)
            .score_match(
                &CallContext::default(),
                &analysis(),
                &ResumeContent::new("", vec![]),
                &[],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ResumeAIError::MalformedOutput { .. }));
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let provider = MockAIProvider::new().with_error(AIError::rate_limited(5));

        let err = ai(&provider)
            .score_match(
                &CallContext::default(),
                &analysis(),
                &ResumeContent::new("", vec![]),
                &[],
            )
            .await
            .unwrap_err();

        assert_eq!(err, ResumeAIError::Provider(AIError::rate_limited(5)));
    }

    #[tokio::test]
    async fn request_metadata_carries_context() {
        let provider = MockAIProvider::new().with_response(r#"{"score": 50}"#);
        let user_id = UserId::new("user-7").unwrap();
        let resume_id = ResumeId::new();
        let ctx = CallContext::for_resume(user_id.clone(), resume_id, CancellationToken::new());

        ai(&provider)
            .score_match(&ctx, &analysis(), &ResumeContent::new("", vec![]), &[])
            .await
            .unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls[0].metadata.operation, "score_match");
        assert_eq!(calls[0].metadata.user_id, Some(user_id));
        assert_eq!(calls[0].metadata.resume_id, Some(resume_id));
        assert_eq!(calls[0].system_prompt.as_deref(), Some(prompts::SYSTEM_PROMPT));
    }

    #[tokio::test]
    async fn oversized_prompt_fails_before_calling_the_provider() {
        let provider = MockAIProvider::new()
            .with_provider_info(ProviderInfo::new("tiny", "tiny-model", 1_000))
            .with_response(r#"{"title":"unused"}"#);

        let err = ai(&provider)
            .analyze_job(&CallContext::default(), "We need Go", &TargetLanguage::english())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResumeAIError::Provider(AIError::ContextTooLong { max: 1_000, .. })
        ));
        assert!(!err.is_retryable());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn huge_completion_budget_is_rejected_without_overflow() {
        let provider = MockAIProvider::new().with_response(r#"{"title":"unused"}"#);

        let err = LlmResumeAI::new(Arc::new(provider.clone()))
            .with_max_tokens(u32::MAX)
            .analyze_job(&CallContext::default(), "We need Go", &TargetLanguage::english())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ResumeAIError::Provider(AIError::context_too_long(u32::MAX, 128_000))
        );
        assert_eq!(provider.call_count(), 0);
    }
}
