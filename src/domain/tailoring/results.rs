//! Per-step results of the tailoring pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{BulletId, MatchScore, ValidationError};
use crate::domain::resume::ResumeAnalysis;

/// Maximum job keywords a single rewritten bullet may claim.
pub const MAX_TAILORED_KEYWORDS: usize = 5;

/// Ordered subset of candidate bullet ids chosen for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletSelection {
    bullet_ids: Vec<BulletId>,
    reasoning: String,
}

impl BulletSelection {
    /// Builds a selection, dropping repeated ids.
    pub fn new(bullet_ids: Vec<BulletId>, reasoning: impl Into<String>) -> Self {
        let mut unique = Vec::with_capacity(bullet_ids.len());
        for id in bullet_ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self {
            bullet_ids: unique,
            reasoning: reasoning.into(),
        }
    }

    pub fn bullet_ids(&self) -> &[BulletId] {
        &self.bullet_ids
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn len(&self) -> usize {
        self.bullet_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullet_ids.is_empty()
    }

    /// Keeps only ids present in `candidates`; returns the ids dropped.
    pub fn retain_candidates(&mut self, candidates: &HashSet<BulletId>) -> Vec<BulletId> {
        let (kept, foreign): (Vec<_>, Vec<_>) = self
            .bullet_ids
            .iter()
            .copied()
            .partition(|id| candidates.contains(id));
        self.bullet_ids = kept;
        foreign
    }

    pub fn into_ids(self) -> Vec<BulletId> {
        self.bullet_ids
    }
}

/// One bullet rewritten for the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailoredBulletResult {
    bullet_id: BulletId,
    content: String,
    keywords_used: Vec<String>,
}

impl TailoredBulletResult {
    /// Validates the rewrite; keywords are trimmed, de-duplicated and capped.
    pub fn new(
        bullet_id: BulletId,
        content: impl Into<String>,
        keywords_used: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::empty_field("tailored_content"));
        }

        let mut keywords: Vec<String> = Vec::new();
        for keyword in keywords_used {
            let keyword = keyword.trim();
            if keyword.is_empty() || keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
                continue;
            }
            keywords.push(keyword.to_string());
            if keywords.len() == MAX_TAILORED_KEYWORDS {
                break;
            }
        }

        Ok(Self {
            bullet_id,
            content: content.to_string(),
            keywords_used: keywords,
        })
    }

    pub fn bullet_id(&self) -> &BulletId {
        &self.bullet_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn keywords_used(&self) -> &[String] {
        &self.keywords_used
    }
}

/// Professional summary for the top of the resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    summary: String,
}

impl SummaryResult {
    pub fn new(summary: impl Into<String>) -> Result<Self, ValidationError> {
        let summary = summary.into();
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(ValidationError::empty_field("summary"));
        }
        Ok(Self {
            summary: summary.to_string(),
        })
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Rough sentence count, by terminal punctuation.
    pub fn sentence_count(&self) -> usize {
        self.summary
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count()
    }

    pub fn into_summary(self) -> String {
        self.summary
    }
}

/// Result of the scoring step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: MatchScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ResumeAnalysis>,
}

impl MatchResult {
    pub fn new(score: MatchScore) -> Self {
        Self {
            score,
            analysis: None,
        }
    }

    pub fn with_analysis(mut self, analysis: ResumeAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }
}
