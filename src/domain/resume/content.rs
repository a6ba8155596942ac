//! Generated resume content and its match analysis.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BulletId, Date, ExperienceId, MatchScore};

/// The assembled output of a tailoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    pub summary: String,
    pub experiences: Vec<TailoredExperience>,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ResumeAnalysis>,
}

impl ResumeContent {
    pub fn new(summary: impl Into<String>, experiences: Vec<TailoredExperience>) -> Self {
        Self {
            summary: summary.into(),
            experiences,
            skills: Vec::new(),
            analysis: None,
        }
    }

    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_analysis(mut self, analysis: ResumeAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    /// Total number of tailored bullets across all experiences.
    pub fn bullet_count(&self) -> usize {
        self.experiences.iter().map(|e| e.bullets.len()).sum()
    }

    /// Bullet ids in presentation order.
    pub fn bullet_ids(&self) -> Vec<BulletId> {
        self.experiences
            .iter()
            .flat_map(|e| e.bullets.iter().map(|b| b.bullet_id))
            .collect()
    }

    /// Keywords woven into any bullet, de-duplicated case-insensitively.
    pub fn all_keywords(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut keywords = Vec::new();
        for keyword in self
            .experiences
            .iter()
            .flat_map(|e| e.bullets.iter())
            .flat_map(|b| b.keywords.iter())
        {
            let lowered = keyword.to_lowercase();
            if !seen.contains(&lowered) {
                seen.push(lowered);
                keywords.push(keyword.clone());
            }
        }
        keywords
    }

    /// Drops a bullet, and its experience group if it becomes empty.
    pub fn remove_bullet(&mut self, bullet_id: &BulletId) -> bool {
        let mut removed = false;
        for experience in &mut self.experiences {
            let before = experience.bullets.len();
            experience.bullets.retain(|b| &b.bullet_id != bullet_id);
            removed |= experience.bullets.len() != before;
        }
        self.experiences.retain(|e| !e.bullets.is_empty());
        removed
    }
}

/// An experience as presented in a tailored resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredExperience {
    pub experience_id: ExperienceId,
    pub title: String,
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    pub is_current: bool,
    pub bullets: Vec<TailoredBullet>,
}

impl TailoredExperience {
    /// "Jan 2020 - Present" style range.
    pub fn date_range(&self) -> String {
        let end = match self.end_date {
            Some(end) if !self.is_current => end.format_month_year(),
            _ => "Present".to_string(),
        };
        format!("{} - {}", self.start_date.format_month_year(), end)
    }
}

/// A rewritten bullet alongside its source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailoredBullet {
    pub bullet_id: BulletId,
    pub original_content: String,
    pub tailored_content: String,
    pub keywords: Vec<String>,
}

/// How the resume lines up against the job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

/// Per-dimension scores feeding the composite match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: MatchScore,
    pub experience: MatchScore,
    pub seniority: MatchScore,
    pub keywords: MatchScore,
}

impl ScoreBreakdown {
    pub const SKILLS_WEIGHT: u32 = 40;
    pub const EXPERIENCE_WEIGHT: u32 = 30;
    pub const SENIORITY_WEIGHT: u32 = 15;
    pub const KEYWORDS_WEIGHT: u32 = 15;

    /// Composite score using the 40/30/15/15 weighting.
    pub fn weighted_total(&self) -> MatchScore {
        let weighted = u32::from(self.skills.value()) * Self::SKILLS_WEIGHT
            + u32::from(self.experience.value()) * Self::EXPERIENCE_WEIGHT
            + u32::from(self.seniority.value()) * Self::SENIORITY_WEIGHT
            + u32::from(self.keywords.value()) * Self::KEYWORDS_WEIGHT;
        // weights sum to 100, so the rounded mean stays within 0..=100
        let total = (weighted + 50) / 100;
        MatchScore::new(i64::from(total)).unwrap_or_default()
    }
}
