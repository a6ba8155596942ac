//! Bullet entity - one atomic, independently selectable achievement.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{BulletId, ExperienceId, ImpactScore, Timestamp, ValidationError};

/// Maximum length for bullet content.
pub const MAX_CONTENT_LENGTH: usize = 1_000;

/// An achievement or responsibility statement belonging to an experience.
///
/// # Invariants
///
/// - `content` is non-empty after trimming
/// - `keywords` contains no case-insensitive duplicates and no blanks
/// - every mutation refreshes `updated_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    id: BulletId,
    experience_id: ExperienceId,
    content: String,
    impact_score: ImpactScore,
    keywords: Vec<String>,
    metadata: BTreeMap<String, serde_json::Value>,
    display_order: u32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Bullet {
    /// Creates a bullet with the default impact score.
    pub fn new(
        id: BulletId,
        experience_id: ExperienceId,
        content: impl Into<String>,
        display_order: u32,
    ) -> Result<Self, ValidationError> {
        let content = Self::validate_content(content.into())?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            experience_id,
            content,
            impact_score: ImpactScore::default(),
            keywords: Vec::new(),
            metadata: BTreeMap::new(),
            display_order,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a bullet from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: BulletId,
        experience_id: ExperienceId,
        content: String,
        impact_score: ImpactScore,
        keywords: Vec<String>,
        metadata: BTreeMap<String, serde_json::Value>,
        display_order: u32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            experience_id,
            content,
            impact_score,
            keywords,
            metadata,
            display_order,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &BulletId {
        &self.id
    }

    pub fn experience_id(&self) -> &ExperienceId {
        &self.experience_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn impact_score(&self) -> ImpactScore {
        self.impact_score
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }

    pub fn display_order(&self) -> u32 {
        self.display_order
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Case-insensitive whole-word check against content and keywords.
    ///
    /// "Go" matches "Built Go services" but not "Google".
    pub fn mentions(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return false;
        }
        self.keywords.iter().any(|k| k.to_lowercase() == term)
            || contains_word(&self.content.to_lowercase(), &term)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the bullet text.
    pub fn update_content(&mut self, content: impl Into<String>) -> Result<(), ValidationError> {
        self.content = Self::validate_content(content.into())?;
        self.touch();
        Ok(())
    }

    /// Replaces the keyword set, trimming and de-duplicating in order.
    pub fn set_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.clear();
        for keyword in keywords {
            self.push_keyword(keyword.into());
        }
        self.touch();
    }

    /// Adds a keyword; returns false if it was already present.
    pub fn add_keyword(&mut self, keyword: impl Into<String>) -> bool {
        let added = self.push_keyword(keyword.into());
        if added {
            self.touch();
        }
        added
    }

    pub fn set_impact_score(&mut self, score: ImpactScore) {
        self.impact_score = score;
        self.touch();
    }

    pub fn set_display_order(&mut self, order: u32) {
        self.display_order = order;
        self.touch();
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
        self.touch();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn push_keyword(&mut self, keyword: String) -> bool {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            return false;
        }
        let lowered = trimmed.to_lowercase();
        if self.keywords.iter().any(|k| k.to_lowercase() == lowered) {
            return false;
        }
        self.keywords.push(trimmed.to_string());
        true
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_content(content: String) -> Result<String, ValidationError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        if trimmed.chars().count() > MAX_CONTENT_LENGTH {
            return Err(ValidationError::out_of_range(
                "content",
                1,
                MAX_CONTENT_LENGTH as i64,
                trimmed.chars().count() as i64,
            ));
        }
        Ok(trimmed.to_string())
    }
}

/// Whether `term` occurs in `text` without alphanumerics on either side.
fn contains_word(text: &str, term: &str) -> bool {
    text.match_indices(term).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bullet() -> Bullet {
        Bullet::new(
            BulletId::new(),
            ExperienceId::new(),
            "Migrated billing to PostgreSQL, cutting query latency 40%",
            0,
        )
        .unwrap()
    }

    #[test]
    fn new_bullet_has_default_impact() {
        assert_eq!(test_bullet().impact_score().value(), 50);
    }

    #[test]
    fn rejects_blank_content() {
        let result = Bullet::new(BulletId::new(), ExperienceId::new(), "   ", 0);
        assert_eq!(result.unwrap_err(), ValidationError::empty_field("content"));
    }

    #[test]
    fn update_content_trims_and_touches() {
        let mut bullet = test_bullet();
        let before = *bullet.updated_at();
        std::thread::sleep(std::time::Duration::from_millis(2));
        bullet.update_content("  Led a team of 5  ").unwrap();
        assert_eq!(bullet.content(), "Led a team of 5");
        assert!(bullet.updated_at().is_after(&before));
    }

    #[test]
    fn update_content_rejects_blank_and_keeps_old_text() {
        let mut bullet = test_bullet();
        assert!(bullet.update_content("").is_err());
        assert!(bullet.content().starts_with("Migrated"));
    }

    #[test]
    fn keywords_are_an_ordered_set() {
        let mut bullet = test_bullet();
        bullet.set_keywords(["PostgreSQL", "go", " ", "postgresql", "Go", "billing"]);
        assert_eq!(bullet.keywords(), &["PostgreSQL", "go", "billing"]);
        assert!(!bullet.add_keyword("BILLING"));
        assert!(bullet.add_keyword("latency"));
        assert_eq!(bullet.keywords().len(), 4);
    }

    #[test]
    fn mentions_checks_content_and_keywords() {
        let mut bullet = test_bullet();
        bullet.set_keywords(["Go"]);
        assert!(bullet.mentions("postgresql"));
        assert!(bullet.mentions("GO"));
        assert!(!bullet.mentions("Photoshop"));
        assert!(!bullet.mentions(""));
    }

    #[test]
    fn mentions_needs_whole_words() {
        let bullet = Bullet::new(
            BulletId::new(),
            ExperienceId::new(),
            "Integrated Google Ads with C++ services",
            0,
        )
        .unwrap();
        assert!(!bullet.mentions("Go"));
        assert!(bullet.mentions("google ads"));
        assert!(bullet.mentions("C++"));
    }

    #[test]
    fn metadata_is_free_form() {
        let mut bullet = test_bullet();
        bullet.set_metadata("source", serde_json::json!("linkedin"));
        assert_eq!(bullet.metadata()["source"], "linkedin");
    }
}
