//! Structured view of a job description.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seniority the job is pitched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityLevel {
    Intern,
    Junior,
    Mid,
    Senior,
    Lead,
    Principal,
    Executive,
    #[default]
    Unknown,
}

impl SeniorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityLevel::Intern => "intern",
            SeniorityLevel::Junior => "junior",
            SeniorityLevel::Mid => "mid",
            SeniorityLevel::Senior => "senior",
            SeniorityLevel::Lead => "lead",
            SeniorityLevel::Principal => "principal",
            SeniorityLevel::Executive => "executive",
            SeniorityLevel::Unknown => "unknown",
        }
    }

    /// Lenient decoding of free text; anything unrecognised is `Unknown`.
    pub fn from_reported(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let has = |needles: &[&str]| words.iter().any(|w| needles.contains(w));

        if has(&["intern", "internship", "trainee"]) {
            SeniorityLevel::Intern
        } else if has(&["principal", "staff", "distinguished"]) {
            SeniorityLevel::Principal
        } else if has(&["chief", "vp", "director", "head", "executive", "cto", "ceo"]) {
            SeniorityLevel::Executive
        } else if has(&["lead", "manager"]) {
            SeniorityLevel::Lead
        } else if has(&["senior", "sr"]) {
            SeniorityLevel::Senior
        } else if has(&["mid", "middle", "intermediate"]) {
            SeniorityLevel::Mid
        } else if has(&["junior", "jr", "entry", "graduate"]) {
            SeniorityLevel::Junior
        } else {
            SeniorityLevel::Unknown
        }
    }

    /// Heuristic seniority from a job title, used by the offline backend.
    pub fn from_title(title: &str) -> Self {
        Self::from_reported(title)
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the analysis step extracted from a job description.
///
/// Not persisted; recomputed on every tailoring run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub keywords: Vec<String>,
    pub seniority: SeniorityLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    pub summary: String,
}

impl JobAnalysis {
    /// Required, preferred and keyword terms, de-duplicated case-insensitively.
    pub fn all_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        for term in self
            .required_skills
            .iter()
            .chain(&self.preferred_skills)
            .chain(&self.keywords)
        {
            let term = term.trim();
            if !term.is_empty() && !terms.iter().any(|t| t.eq_ignore_ascii_case(term)) {
                terms.push(term.to_string());
            }
        }
        terms
    }

    pub fn requires_skill(&self, skill: &str) -> bool {
        self.required_skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case(skill.trim()))
    }
}
