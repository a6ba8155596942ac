//! Resume aggregate - one tailored application for one job.

use serde::{Deserialize, Serialize};

use super::{ResumeContent, ResumeError, ResumeStatus};
use crate::domain::foundation::{
    BulletId, MatchScore, ResumeId, StateMachine, TargetLanguage, Timestamp, UserId,
    ValidationError,
};

/// Maximum accepted job description size, in characters.
pub const MAX_JOB_DESCRIPTION_LENGTH: usize = 50_000;

/// Resume aggregate root.
///
/// # Invariants
///
/// - `job_description` is non-empty and never changes after creation
/// - `selected_bullets` holds no duplicates
/// - status only changes along the resume transition table
/// - a failed mutation leaves the aggregate untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    id: ResumeId,
    user_id: UserId,
    job_description: String,
    job_title: Option<String>,
    company: Option<String>,
    job_url: Option<String>,
    target_language: TargetLanguage,
    selected_bullets: Vec<BulletId>,
    content: Option<ResumeContent>,
    pdf_url: Option<String>,
    match_score: MatchScore,
    notes: Option<String>,
    status: ResumeStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Resume {
    /// Creates a draft resume from a job description.
    pub fn new(
        id: ResumeId,
        user_id: UserId,
        job_description: impl Into<String>,
        target_language: TargetLanguage,
    ) -> Result<Self, ValidationError> {
        let job_description = job_description.into();
        let trimmed = job_description.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("job_description"));
        }
        let length = trimmed.chars().count();
        if length > MAX_JOB_DESCRIPTION_LENGTH {
            return Err(ValidationError::out_of_range(
                "job_description",
                1,
                MAX_JOB_DESCRIPTION_LENGTH as i64,
                length as i64,
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            job_description: trimmed.to_string(),
            job_title: None,
            company: None,
            job_url: None,
            target_language,
            selected_bullets: Vec::new(),
            content: None,
            pdf_url: None,
            match_score: MatchScore::default(),
            notes: None,
            status: ResumeStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a resume from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ResumeId,
        user_id: UserId,
        job_description: String,
        job_title: Option<String>,
        company: Option<String>,
        job_url: Option<String>,
        target_language: TargetLanguage,
        selected_bullets: Vec<BulletId>,
        content: Option<ResumeContent>,
        pdf_url: Option<String>,
        match_score: MatchScore,
        notes: Option<String>,
        status: ResumeStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            job_description,
            job_title,
            company,
            job_url,
            target_language,
            selected_bullets,
            content,
            pdf_url,
            match_score,
            notes,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ResumeId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn job_title(&self) -> Option<&str> {
        self.job_title.as_deref()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn job_url(&self) -> Option<&str> {
        self.job_url.as_deref()
    }

    pub fn target_language(&self) -> &TargetLanguage {
        &self.target_language
    }

    pub fn selected_bullets(&self) -> &[BulletId] {
        &self.selected_bullets
    }

    pub fn content(&self) -> Option<&ResumeContent> {
        self.content.as_ref()
    }

    pub fn pdf_url(&self) -> Option<&str> {
        self.pdf_url.as_deref()
    }

    pub fn match_score(&self) -> MatchScore {
        self.match_score
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn status(&self) -> ResumeStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// True when a tailoring run may start from the current status.
    pub fn can_generate(&self) -> bool {
        self.status.allows_generation()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User edits
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_job_details(
        &mut self,
        job_title: Option<String>,
        company: Option<String>,
        job_url: Option<String>,
    ) {
        self.job_title = non_blank(job_title);
        self.company = non_blank(company);
        self.job_url = non_blank(job_url);
        self.touch();
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = non_blank(notes);
        self.touch();
    }

    pub fn set_pdf_url(&mut self, pdf_url: Option<String>) {
        self.pdf_url = non_blank(pdf_url);
        self.touch();
    }

    /// Replaces content after a manual edit; status is kept.
    pub fn update_content(&mut self, content: ResumeContent) {
        self.content = Some(content);
        self.touch();
    }

    /// Explicit user-driven status change.
    pub fn transition_status(&mut self, to: ResumeStatus) -> Result<(), ResumeError> {
        self.status = self.status.transition_to(to)?;
        self.touch();
        Ok(())
    }

    /// Removes a deleted bullet from the selection and any generated content.
    ///
    /// Returns true if the resume referenced the bullet.
    pub fn remove_bullet(&mut self, bullet_id: &BulletId) -> bool {
        let before = self.selected_bullets.len();
        self.selected_bullets.retain(|id| id != bullet_id);
        let mut removed = self.selected_bullets.len() != before;
        if let Some(content) = self.content.as_mut() {
            removed |= content.remove_bullet(bullet_id);
        }
        if removed {
            self.touch();
        }
        removed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tailoring output
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the selection, dropping duplicates while keeping order.
    pub fn select_bullets(&mut self, ids: Vec<BulletId>) {
        let mut selected = Vec::with_capacity(ids.len());
        for id in ids {
            if !selected.contains(&id) {
                selected.push(id);
            }
        }
        self.selected_bullets = selected;
        self.touch();
    }

    /// Stores generated content and moves the resume to `generated`.
    ///
    /// Legal from `draft` and `generated` only.
    pub fn set_generated_content(&mut self, content: ResumeContent) -> Result<(), ResumeError> {
        self.ensure_can_generate()?;
        self.content = Some(content);
        self.status = ResumeStatus::Generated;
        self.touch();
        Ok(())
    }

    pub fn set_score(&mut self, score: MatchScore) {
        self.match_score = score;
        self.touch();
    }

    /// Applies a whole tailoring run at once, or nothing on error.
    pub fn apply_tailoring(
        &mut self,
        selected: Vec<BulletId>,
        content: ResumeContent,
        score: MatchScore,
    ) -> Result<(), ResumeError> {
        self.ensure_can_generate()?;
        self.select_bullets(selected);
        self.set_generated_content(content)?;
        self.set_score(score);
        Ok(())
    }

    fn ensure_can_generate(&self) -> Result<(), ResumeError> {
        if self.can_generate() {
            Ok(())
        } else {
            Err(ResumeError::InvalidStatusTransition {
                from: self.status,
                to: ResumeStatus::Generated,
            })
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
