//! ResumeTailor - runs the analyze → select → tailor → summarize → score pipeline.
//!
//! The orchestrator talks only to ports. It never persists anything: on
//! success it applies the whole run to the resume in one step, on error
//! the resume is left exactly as it was.

use futures::{stream, StreamExt, TryStreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::experience::Bullet;
use crate::domain::foundation::{BulletId, MatchScore, TargetLanguage};
use crate::domain::profile::Skill;
use crate::domain::resume::{Resume, ResumeContent, ResumeError};
use crate::domain::tailoring::{
    CandidatePool, JobAnalysis, TailoredBulletResult, TailoringOptions,
};
use crate::ports::{CallContext, ProfileReader, ResumeAI, ResumeAIError};

/// What a successful run produced, already applied to the resume.
#[derive(Debug, Clone)]
pub struct TailoringOutcome {
    pub analysis: JobAnalysis,
    pub selected: Vec<BulletId>,
    pub content: ResumeContent,
    pub score: MatchScore,
    /// Ids the backend returned that were not candidates.
    pub dropped_ids: Vec<BulletId>,
}

/// The tailoring orchestrator.
pub struct ResumeTailor {
    ai: Arc<dyn ResumeAI>,
    profiles: Arc<dyn ProfileReader>,
}

impl ResumeTailor {
    pub fn new(ai: Arc<dyn ResumeAI>, profiles: Arc<dyn ProfileReader>) -> Self {
        Self { ai, profiles }
    }

    /// Runs the full pipeline and applies the result to `resume`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for unusable options
    /// - `InvalidStatusTransition` if the resume cannot be (re)generated
    /// - `ProfileNotFound` if the owner has no candidate profile
    /// - `ServiceUnavailable` / `MalformedOutput` / `Cancelled` from the AI steps
    pub async fn tailor(
        &self,
        ctx: &CallContext,
        resume: &mut Resume,
        options: &TailoringOptions,
    ) -> Result<TailoringOutcome, ResumeError> {
        options.validate()?;
        if !resume.can_generate() {
            return Err(ResumeError::InvalidStatusTransition {
                from: resume.status(),
                to: crate::domain::resume::ResumeStatus::Generated,
            });
        }

        let started = Instant::now();
        let resume_id = *resume.id();
        let user_id = resume.user_id().clone();
        let language = options
            .target_language
            .clone()
            .unwrap_or_else(|| resume.target_language().clone());
        tracing::info!(%resume_id, language = %language, "tailoring started");

        let profile = self
            .profiles
            .get_profile(&user_id)
            .await?
            .ok_or_else(|| ResumeError::ProfileNotFound(user_id.clone()))?;
        let experiences = self.profiles.list_experiences(&user_id).await?;
        let skills = self.profiles.list_skills(&user_id).await?;
        let pool = CandidatePool::new(experiences, options);
        tracing::debug!(
            %resume_id,
            experiences = pool.experiences().len(),
            candidates = pool.len(),
            "candidate pool loaded"
        );

        // 1. Analyze
        ensure_active(ctx)?;
        let mut analysis = self
            .ai
            .analyze_job(ctx, resume.job_description(), &language)
            .await?;
        merge_highlights(&mut analysis, &options.highlight_skills);
        tracing::debug!(
            %resume_id,
            title = %analysis.title,
            seniority = %analysis.seniority,
            required = analysis.required_skills.len(),
            "job analyzed"
        );

        // 2. Select, then validate against the candidate set
        let (selected, dropped_ids) = self
            .select(ctx, &analysis, &pool, options, &language)
            .await?;
        tracing::debug!(%resume_id, selected = selected.len(), "bullets selected");

        // 3. Tailor each selected bullet, preserving selection order
        let tailored = self
            .tailor_bullets(ctx, &analysis, &pool, &selected, options, &language)
            .await?;

        // 4. Group under experiences
        let experiences = pool.group(&tailored);

        // 5. Summarize
        ensure_active(ctx)?;
        let summary = self
            .ai
            .generate_summary(ctx, &profile, &analysis, &tailored, &language)
            .await?;
        let sentences = summary.sentence_count();
        if !(3..=4).contains(&sentences) {
            tracing::warn!(%resume_id, sentences, "summary length outside 3-4 sentences");
        }

        // 6. Assemble and score
        let content = ResumeContent::new(summary.into_summary(), experiences)
            .with_skills(ordered_skills(&skills, &analysis, &options.highlight_skills));
        ensure_active(ctx)?;
        let result = self
            .ai
            .score_match(ctx, &analysis, &content, &skills)
            .await?;
        let content = match result.analysis {
            Some(report) => content.with_analysis(report),
            None => content,
        };

        // 7. Apply atomically
        resume.apply_tailoring(selected.clone(), content.clone(), result.score)?;

        tracing::info!(
            %resume_id,
            bullets = selected.len(),
            score = result.score.value(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tailoring completed"
        );

        Ok(TailoringOutcome {
            analysis,
            selected,
            content,
            score: result.score,
            dropped_ids,
        })
    }

    async fn select(
        &self,
        ctx: &CallContext,
        analysis: &JobAnalysis,
        pool: &CandidatePool,
        options: &TailoringOptions,
        language: &TargetLanguage,
    ) -> Result<(Vec<BulletId>, Vec<BulletId>), ResumeError> {
        if pool.is_empty() {
            tracing::warn!("no candidate bullets; skipping selection");
            return Ok((Vec::new(), Vec::new()));
        }

        ensure_active(ctx)?;
        let mut selection = self
            .ai
            .select_bullets(ctx, analysis, &pool.bullets(), options.max_bullets, language)
            .await?;

        let dropped = selection.retain_candidates(&pool.ids());
        if !dropped.is_empty() {
            tracing::warn!(
                dropped = dropped.len(),
                ids = ?dropped,
                "backend selected bullets outside the candidate set"
            );
        }

        let mut ids = match options.max_bullets_per_experience {
            Some(max) => pool.cap_per_experience(selection.bullet_ids(), max),
            None => selection.into_ids(),
        };
        ids.truncate(options.max_bullets);
        Ok((ids, dropped))
    }

    async fn tailor_bullets(
        &self,
        ctx: &CallContext,
        analysis: &JobAnalysis,
        pool: &CandidatePool,
        selected: &[BulletId],
        options: &TailoringOptions,
        language: &TargetLanguage,
    ) -> Result<Vec<TailoredBulletResult>, ResumeError> {
        let bullets: Vec<Bullet> = selected
            .iter()
            .filter_map(|id| pool.bullet(id).cloned())
            .collect();
        let ai = &self.ai;
        let style = options.style;

        let tailored: Vec<TailoredBulletResult> = stream::iter(bullets)
            .map(|bullet| async move {
                ensure_active(ctx)?;
                let result = ai
                    .tailor_bullet(ctx, &bullet, analysis, language, style)
                    .await?;
                if result.bullet_id() != bullet.id() {
                    return Err(ResumeAIError::malformed(
                        "tailor_bullet",
                        format!("result for {} returned for {}", result.bullet_id(), bullet.id()),
                    ));
                }
                Ok(result)
            })
            .buffered(options.concurrency)
            .try_collect::<Vec<_>>()
            .await?;

        tracing::debug!(tailored = tailored.len(), "bullets tailored");
        Ok(tailored)
    }
}

fn ensure_active(ctx: &CallContext) -> Result<(), ResumeAIError> {
    if ctx.is_cancelled() {
        Err(ResumeAIError::Cancelled)
    } else {
        Ok(())
    }
}

/// Caller-highlighted skills also count as job keywords.
fn merge_highlights(analysis: &mut JobAnalysis, highlights: &[String]) {
    for skill in highlights {
        let skill = skill.trim();
        if !skill.is_empty() && !analysis.keywords.iter().any(|k| k.eq_ignore_ascii_case(skill)) {
            analysis.keywords.push(skill.to_string());
        }
    }
}

/// Highlighted skills first, then job-relevant ones, then the rest.
fn ordered_skills(skills: &[Skill], analysis: &JobAnalysis, highlights: &[String]) -> Vec<String> {
    let terms: HashSet<String> = analysis
        .all_terms()
        .iter()
        .map(|t| t.to_lowercase())
        .collect();
    let rank = |skill: &Skill| {
        if highlights.iter().any(|h| skill.matches(h)) {
            0
        } else if terms.contains(&skill.name().to_lowercase()) {
            1
        } else {
            2
        }
    };

    let mut ranked: Vec<&Skill> = skills.iter().collect();
    ranked.sort_by_key(|s| rank(s));
    ranked.into_iter().map(|s| s.name().to_string()).collect()
}
