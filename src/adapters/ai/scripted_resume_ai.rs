//! Deterministic, offline ResumeAI backend.
//!
//! Uses keyword overlap instead of a language model. Same input always
//! gives the same output, which makes it suitable for tests, demos and
//! the `--offline` CLI mode.

use async_trait::async_trait;

use crate::domain::experience::Bullet;
use crate::domain::foundation::{MatchScore, TargetLanguage};
use crate::domain::profile::{CandidateProfile, Skill};
use crate::domain::resume::{ResumeAnalysis, ResumeContent, ScoreBreakdown};
use crate::domain::tailoring::{
    BulletSelection, JobAnalysis, MatchResult, SeniorityLevel, SummaryResult,
    TailoredBulletResult, TailoringStyle, MAX_TAILORED_KEYWORDS,
};
use crate::ports::{CallContext, ResumeAI, ResumeAIError};

/// Skills and tools recognised in job descriptions.
const KNOWN_TERMS: &[&str] = &[
    "Go", "Rust", "Python", "Java", "Kotlin", "Scala", "C", "C++", "C#", "Ruby", "PHP",
    "JavaScript", "TypeScript", "Node.js", "React", "Angular", "Vue", "Swift", "SQL",
    "PostgreSQL", "MySQL", "MongoDB", "Redis", "Kafka", "RabbitMQ", "Elasticsearch",
    "GraphQL", "gRPC", "REST", "Docker", "Kubernetes", "Terraform", "Ansible", "AWS", "GCP",
    "Azure", "Linux", "CI/CD", "Git", "Spark", "Airflow", "Snowflake", "Tableau", "Excel",
    "Salesforce", "Figma", "Photoshop", "Illustrator", "Jira", "Agile", "Scrum",
    "microservices", "distributed", "observability", "security", "leadership", "mentoring",
];

const STOP_WORDS: &[&str] = &[
    "about", "across", "after", "their", "there", "these", "which", "while", "would",
    "should", "could", "where", "other", "years", "experience", "strong", "ability",
    "including", "within", "team", "teams", "working", "work", "looking", "candidate",
    "required", "preferred", "skills", "knowledge", "plus", "needs", "must",
];

const MAX_KEYWORDS: usize = 15;

/// Keyword-overlap implementation of [`ResumeAI`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedResumeAI;

impl ScriptedResumeAI {
    pub fn new() -> Self {
        Self
    }
}

fn tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '(' | ')' | '"'))
        .map(|t| t.trim_matches(|c: char| matches!(c, '.' | '!' | '?' | '\'')))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Short names ("Go", "C") only match with their exact casing.
fn term_matches(token: &str, term: &str) -> bool {
    if term.len() <= 2 {
        token == term
    } else {
        token.eq_ignore_ascii_case(term)
    }
}

fn push_unique(terms: &mut Vec<String>, term: &str) {
    if !terms.iter().any(|t| t.eq_ignore_ascii_case(term)) {
        terms.push(term.to_string());
    }
}

fn job_title(job_description: &str) -> String {
    let first_line = job_description
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();
    let title = first_line
        .split([',', '|', '('])
        .next()
        .unwrap_or(first_line)
        .trim()
        .trim_start_matches("Job Title")
        .trim_start_matches(':')
        .trim();
    if title.is_empty() {
        "Untitled Role".to_string()
    } else {
        title.chars().take(100).collect()
    }
}

/// Finds "5+ years" / "3 years" style requirements.
fn years_required(words: &[&str]) -> Option<u32> {
    words.windows(2).find_map(|pair| {
        let number = pair[0].trim_end_matches('+');
        let unit = pair[1].to_ascii_lowercase();
        if unit.starts_with("year") || unit.starts_with("yr") {
            number.parse().ok()
        } else {
            None
        }
    })
}

fn percent(matched: usize, total: usize) -> MatchScore {
    if total == 0 {
        return MatchScore::new(50).unwrap_or_default();
    }
    let value = (matched * 100 + total / 2) / total;
    MatchScore::new(value as i64).unwrap_or_default()
}

fn content_mentions(content: &ResumeContent, term: &str) -> bool {
    let haystack = std::iter::once(content.summary.as_str()).chain(
        content
            .experiences
            .iter()
            .flat_map(|e| e.bullets.iter().map(|b| b.tailored_content.as_str())),
    );
    haystack
        .flat_map(tokens)
        .any(|token| term_matches(token, term))
        || content
            .all_keywords()
            .iter()
            .any(|k| k.eq_ignore_ascii_case(term))
}

fn seniority_fit(seniority: SeniorityLevel, bullet_count: usize) -> MatchScore {
    let value = match seniority {
        SeniorityLevel::Unknown => 70,
        SeniorityLevel::Intern | SeniorityLevel::Junior => 90,
        SeniorityLevel::Mid => 80,
        _ if bullet_count >= 3 => 75,
        _ => 55,
    };
    MatchScore::new(value).unwrap_or_default()
}

#[async_trait]
impl ResumeAI for ScriptedResumeAI {
    async fn analyze_job(
        &self,
        ctx: &CallContext,
        job_description: &str,
        _language: &TargetLanguage,
    ) -> Result<JobAnalysis, ResumeAIError> {
        if ctx.is_cancelled() {
            return Err(ResumeAIError::Cancelled);
        }

        let words = tokens(job_description);
        let title = job_title(job_description);

        let mut required_skills = Vec::new();
        for word in &words {
            if let Some(term) = KNOWN_TERMS.iter().find(|t| term_matches(word, t)) {
                push_unique(&mut required_skills, term);
            }
        }

        let mut keywords = required_skills.clone();
        for word in &words {
            if keywords.len() >= MAX_KEYWORDS {
                break;
            }
            let lowered = word.to_ascii_lowercase();
            let repeated = words.iter().filter(|w| w.eq_ignore_ascii_case(word)).count() > 1;
            if word.len() >= 6 && repeated && !STOP_WORDS.contains(&lowered.as_str()) {
                push_unique(&mut keywords, &lowered);
            }
        }

        let seniority = match SeniorityLevel::from_title(&title) {
            SeniorityLevel::Unknown => SeniorityLevel::from_reported(job_description),
            level => level,
        };

        Ok(JobAnalysis {
            summary: format!("{} role focused on {}.", title, required_skills.join(", ")),
            title,
            company: None,
            required_skills,
            preferred_skills: Vec::new(),
            keywords,
            seniority,
            years_of_experience: years_required(&words),
        })
    }

    async fn select_bullets(
        &self,
        ctx: &CallContext,
        analysis: &JobAnalysis,
        candidates: &[Bullet],
        max_bullets: usize,
        _language: &TargetLanguage,
    ) -> Result<BulletSelection, ResumeAIError> {
        if ctx.is_cancelled() {
            return Err(ResumeAIError::Cancelled);
        }

        let terms = analysis.all_terms();
        let mut ranked: Vec<(usize, usize, &Bullet)> = candidates
            .iter()
            .enumerate()
            .map(|(index, bullet)| {
                let overlap = terms.iter().filter(|t| bullet.mentions(t)).count();
                (overlap, index, bullet)
            })
            .filter(|(overlap, _, _)| *overlap > 0)
            .collect();

        // most overlap, then highest impact, then original order
        ranked.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| b.2.impact_score().cmp(&a.2.impact_score()))
                .then_with(|| a.1.cmp(&b.1))
        });

        let ids = ranked
            .into_iter()
            .take(max_bullets)
            .map(|(_, _, bullet)| *bullet.id())
            .collect::<Vec<_>>();
        let reasoning = format!(
            "Selected {} of {} bullets by overlap with {} job terms.",
            ids.len(),
            candidates.len(),
            terms.len()
        );
        Ok(BulletSelection::new(ids, reasoning))
    }

    async fn tailor_bullet(
        &self,
        ctx: &CallContext,
        bullet: &Bullet,
        analysis: &JobAnalysis,
        _language: &TargetLanguage,
        style: TailoringStyle,
    ) -> Result<TailoredBulletResult, ResumeAIError> {
        if ctx.is_cancelled() {
            return Err(ResumeAIError::Cancelled);
        }

        let keywords: Vec<String> = analysis
            .all_terms()
            .into_iter()
            .filter(|t| bullet.mentions(t))
            .take(MAX_TAILORED_KEYWORDS)
            .collect();

        let mut content = bullet.content().trim().trim_end_matches('.').to_string();
        if style == TailoringStyle::Concise {
            if let Some((head, _)) = content.split_once(['.', ';']) {
                content = head.trim().to_string();
            }
        }
        if let Some(first) = content.chars().next() {
            content = first.to_uppercase().chain(content.chars().skip(1)).collect();
        }
        content.push('.');

        TailoredBulletResult::new(*bullet.id(), content, keywords)
            .map_err(|e| ResumeAIError::malformed("tailor_bullet", e.to_string()))
    }

    async fn generate_summary(
        &self,
        ctx: &CallContext,
        candidate: &CandidateProfile,
        analysis: &JobAnalysis,
        bullets: &[TailoredBulletResult],
        _language: &TargetLanguage,
    ) -> Result<SummaryResult, ResumeAIError> {
        if ctx.is_cancelled() {
            return Err(ResumeAIError::Cancelled);
        }

        let mut strengths: Vec<String> = Vec::new();
        for keyword in bullets.iter().flat_map(|b| b.keywords_used()) {
            push_unique(&mut strengths, keyword);
        }

        let mut sentences = vec![format!(
            "{} is a {} candidate for the {} role.",
            candidate.full_name(),
            candidate.headline().unwrap_or("motivated"),
            analysis.title
        )];
        sentences.push(if strengths.is_empty() {
            "Brings a transferable skill set and a record of delivery.".to_string()
        } else {
            format!("Core strengths include {}.", strengths.join(", "))
        });
        if let Some(best) = bullets.first() {
            sentences.push(format!(
                "Recent highlights include: {}.",
                best.content().trim_end_matches('.')
            ));
        }
        if let Some(years) = candidate.years_of_experience() {
            sentences.push(format!("Has {} years of professional experience.", years));
        }

        SummaryResult::new(sentences.join(" "))
            .map_err(|e| ResumeAIError::malformed("generate_summary", e.to_string()))
    }

    async fn score_match(
        &self,
        ctx: &CallContext,
        analysis: &JobAnalysis,
        content: &ResumeContent,
        skills: &[Skill],
    ) -> Result<MatchResult, ResumeAIError> {
        if ctx.is_cancelled() {
            return Err(ResumeAIError::Cancelled);
        }

        let covered = |term: &str| {
            skills.iter().any(|s| s.matches(term)) || content_mentions(content, term)
        };

        let required_matched = analysis
            .required_skills
            .iter()
            .filter(|s| covered(s.as_str()))
            .count();
        let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = analysis
            .all_terms()
            .into_iter()
            .partition(|t| content_mentions(content, t));
        let relevant_bullets = content
            .experiences
            .iter()
            .flat_map(|e| e.bullets.iter())
            .filter(|b| !b.keywords.is_empty())
            .count();

        let breakdown = ScoreBreakdown {
            skills: percent(required_matched, analysis.required_skills.len()),
            experience: percent(relevant_bullets, content.bullet_count()),
            seniority: seniority_fit(analysis.seniority, content.bullet_count()),
            keywords: percent(
                matched_keywords.len(),
                matched_keywords.len() + missing_keywords.len(),
            ),
        };

        let recommendations = analysis
            .required_skills
            .iter()
            .filter(|s| !covered(s.as_str()))
            .take(3)
            .map(|s| format!("Add evidence of {} if you have it.", s))
            .collect();

        Ok(MatchResult::new(breakdown.weighted_total()).with_analysis(ResumeAnalysis {
            matched_keywords,
            missing_keywords,
            recommendations,
            breakdown: Some(breakdown),
        }))
    }
}
