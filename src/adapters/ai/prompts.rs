//! Prompt templates for the LLM-backed resume AI.
//!
//! Each builder renders the user message for one pipeline step. All of
//! them ask for a single JSON object so responses can go through the
//! tolerant extractor.

use crate::domain::experience::Bullet;
use crate::domain::foundation::TargetLanguage;
use crate::domain::profile::{CandidateProfile, Skill};
use crate::domain::resume::ResumeContent;
use crate::domain::tailoring::{
    JobAnalysis, TailoredBulletResult, TailoringStyle, MAX_TAILORED_KEYWORDS,
};

/// Shared system prompt for every resume call.
pub const SYSTEM_PROMPT: &str = "You are an expert resume writer and technical recruiter. \
Respond with a single JSON object matching the requested shape and nothing else. \
Never invent employers, dates, metrics or achievements that are not present in the input.";

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items.join(", ")
}

pub fn analyze_job_prompt(job_description: &str, language: &TargetLanguage) -> String {
    format!(
        r#"Analyze the following job description.

Job Description:
"""
{job_description}
"""

Provide a JSON response with:
{{
  "title": "job title",
  "company": "company name or null",
  "required_skills": ["skill", ...],
  "preferred_skills": ["skill", ...],
  "keywords": ["term recruiters and ATS systems will scan for", ...],
  "seniority": "intern" | "junior" | "mid" | "senior" | "lead" | "principal" | "executive" | "unknown",
  "years_of_experience": number or null,
  "summary": "two sentence summary of the role"
}}

Write the title and summary in {language}. Keep skills and keywords as they appear in the posting."#,
        job_description = job_description,
        language = language.display_name(),
    )
}

pub fn select_bullets_prompt(
    analysis: &JobAnalysis,
    candidates: &[Bullet],
    max_bullets: usize,
    language: &TargetLanguage,
) -> String {
    let candidates = candidates
        .iter()
        .map(|b| {
            format!(
                "- id: {} | impact: {} | {}",
                b.id(),
                b.impact_score(),
                b.content()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Select the achievement bullets that best position the candidate for this job.

Job: {title}
Required Skills: {required}
Preferred Skills: {preferred}
Keywords: {keywords}
Seniority: {seniority}

Candidate Bullets:
{candidates}

Choose at most {max_bullets} bullets, most relevant first. Prioritize, in order:
1. Direct matches with the required and preferred skills
2. Quantifiable achievements (numbers, percentages, scale)
3. Relevant industry experience
4. Leadership and impact signals

Only use ids from the list above.

Provide a JSON response with:
{{
  "bullet_ids": ["id", ...],
  "reasoning": "one paragraph in {language}"
}}"#,
        title = analysis.title,
        required = bullet_list(&analysis.required_skills),
        preferred = bullet_list(&analysis.preferred_skills),
        keywords = bullet_list(&analysis.keywords),
        seniority = analysis.seniority,
        candidates = candidates,
        max_bullets = max_bullets,
        language = language.display_name(),
    )
}

pub fn tailor_bullet_prompt(
    bullet: &Bullet,
    analysis: &JobAnalysis,
    language: &TargetLanguage,
    style: TailoringStyle,
) -> String {
    format!(
        r#"Rewrite this resume bullet for the target job.

Original Bullet:
{content}

Job: {title}
Keywords: {keywords}
Required Skills: {required}

Rules:
- Lead with a strong action verb and end with a concrete, quantifiable result when the original supports one
- Weave in at most {max_keywords} keywords from the job, only where they are truthful
- Preserve every fact; do not add numbers, tools or outcomes the original does not state
- Style: {guidance}
- Write in {language}

Provide a JSON response with:
{{
  "tailored_content": "the rewritten bullet",
  "keywords_used": ["keyword", ...]
}}"#,
        content = bullet.content(),
        title = analysis.title,
        keywords = bullet_list(&analysis.keywords),
        required = bullet_list(&analysis.required_skills),
        max_keywords = MAX_TAILORED_KEYWORDS,
        guidance = style.guidance(),
        language = language.display_name(),
    )
}

pub fn summary_prompt(
    candidate: &CandidateProfile,
    analysis: &JobAnalysis,
    bullets: &[TailoredBulletResult],
    language: &TargetLanguage,
) -> String {
    let achievements = bullets
        .iter()
        .map(|b| format!("- {}", b.content()))
        .collect::<Vec<_>>()
        .join("\n");
    let years = candidate
        .years_of_experience()
        .map(|y| format!("{} years", y))
        .unwrap_or_else(|| "not stated".to_string());

    format!(
        r#"Write a professional summary for the top of a resume.

Candidate: {name}
Headline: {headline}
Experience: {years}

Target Job: {title}
Key Skills: {required}

Strongest Achievements:
{achievements}

Write 3-4 sentences in {language} that reference the strongest achievements above.
Do not use first person pronouns. Do not claim anything not supported by the achievements.

Provide a JSON response with:
{{
  "summary": "the summary"
}}"#,
        name = candidate.full_name(),
        headline = candidate.headline().unwrap_or("(none)"),
        years = years,
        title = analysis.title,
        required = bullet_list(&analysis.required_skills),
        achievements = achievements,
        language = language.display_name(),
    )
}

pub fn score_match_prompt(
    analysis: &JobAnalysis,
    content: &ResumeContent,
    skills: &[Skill],
) -> String {
    let bullets = content
        .experiences
        .iter()
        .flat_map(|e| {
            e.bullets
                .iter()
                .map(move |b| format!("- [{} at {}] {}", e.title, e.organization, b.tailored_content))
        })
        .collect::<Vec<_>>()
        .join("\n");
    let skills = skills
        .iter()
        .map(|s| s.name().to_string())
        .collect::<Vec<_>>();

    format!(
        r#"Score how well this resume matches the job.

Job: {title}
Seniority: {seniority}
Required Skills: {required}
Preferred Skills: {preferred}
Keywords: {keywords}

Resume Summary:
{summary}

Resume Bullets:
{bullets}

Candidate Skills: {skills}

Score each dimension from 0 to 100, then combine them with these weights:
- skills match: 40%
- experience relevance: 30%
- seniority fit: 15%
- keyword coverage: 15%

Provide a JSON response with:
{{
  "score": 0-100,
  "breakdown": {{ "skills": 0-100, "experience": 0-100, "seniority": 0-100, "keywords": 0-100 }},
  "matched_keywords": ["keyword", ...],
  "missing_keywords": ["keyword", ...],
  "recommendations": ["short actionable suggestion", ...]
}}"#,
        title = analysis.title,
        seniority = analysis.seniority,
        required = bullet_list(&analysis.required_skills),
        preferred = bullet_list(&analysis.preferred_skills),
        keywords = bullet_list(&analysis.keywords),
        summary = content.summary,
        bullets = bullets,
        skills = bullet_list(&skills),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BulletId, ExperienceId, UserId};

    fn analysis() -> JobAnalysis {
        JobAnalysis {
            title: "Senior Backend Engineer".to_string(),
            required_skills: vec!["Go".to_string(), "PostgreSQL".to_string()],
            keywords: vec!["microservices".to_string()],
            ..JobAnalysis::default()
        }
    }

    #[test]
    fn selection_prompt_lists_candidate_ids_and_priorities() {
        let bullet = Bullet::new(
            BulletId::new(),
            ExperienceId::new(),
            "Built Go services handling 10k rps",
            0,
        )
        .unwrap();

        let prompt = select_bullets_prompt(&analysis(), &[bullet.clone()], 6, &TargetLanguage::english());

        assert!(prompt.contains(&bullet.id().to_string()));
        assert!(prompt.contains("at most 6 bullets"));
        let skills = prompt.find("Direct matches").unwrap();
        let metrics = prompt.find("Quantifiable").unwrap();
        let industry = prompt.find("industry").unwrap();
        let leadership = prompt.find("Leadership").unwrap();
        assert!(skills < metrics && metrics < industry && industry < leadership);
    }

    #[test]
    fn tailor_prompt_carries_style_and_keyword_cap() {
        let bullet = Bullet::new(BulletId::new(), ExperienceId::new(), "Led migration", 0).unwrap();
        let prompt = tailor_bullet_prompt(
            &bullet,
            &analysis(),
            &TargetLanguage::new("de").unwrap(),
            TailoringStyle::Technical,
        );

        assert!(prompt.contains("at most 5 keywords"));
        assert!(prompt.contains(TailoringStyle::Technical.guidance()));
        assert!(prompt.contains("German"));
    }

    #[test]
    fn summary_prompt_asks_for_three_to_four_sentences() {
        let candidate = CandidateProfile::new(UserId::new("u-1").unwrap(), "Ada Lovelace").unwrap();
        let prompt = summary_prompt(&candidate, &analysis(), &[], &TargetLanguage::english());
        assert!(prompt.contains("3-4 sentences"));
        assert!(prompt.contains("Ada Lovelace"));
    }

    #[test]
    fn score_prompt_states_weights() {
        let prompt = score_match_prompt(&analysis(), &ResumeContent::new("Summary", vec![]), &[]);
        for weight in ["40%", "30%", "15%"] {
            assert!(prompt.contains(weight));
        }
    }
}
