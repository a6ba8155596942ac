//! Experience aggregate - a work, education or project entry owning bullets.

use serde::{Deserialize, Serialize};

use super::{Bullet, ExperienceType};
use crate::domain::foundation::{
    BulletId, Date, ExperienceId, Timestamp, UserId, ValidationError,
};

/// Experience aggregate.
///
/// # Invariants
///
/// - `title` and `organization` are non-empty
/// - `start_date` is set (not the zero date)
/// - `end_date`, when present, is not before `start_date`
/// - a current experience carries no end date
/// - every owned bullet references this experience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    id: ExperienceId,
    user_id: UserId,
    experience_type: ExperienceType,
    title: String,
    organization: String,
    location: Option<String>,
    start_date: Date,
    end_date: Option<Date>,
    is_current: bool,
    description: Option<String>,
    display_order: u32,
    bullets: Vec<Bullet>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Experience {
    /// Creates a current experience starting on `start_date`.
    pub fn new(
        id: ExperienceId,
        user_id: UserId,
        experience_type: ExperienceType,
        title: impl Into<String>,
        organization: impl Into<String>,
        start_date: Date,
    ) -> Result<Self, ValidationError> {
        let title = non_empty("title", title.into())?;
        let organization = non_empty("organization", organization.into())?;
        if start_date.is_zero() {
            return Err(ValidationError::empty_field("start_date"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            experience_type,
            title,
            organization,
            location: None,
            start_date,
            end_date: None,
            is_current: true,
            description: None,
            display_order: 0,
            bullets: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ExperienceId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn experience_type(&self) -> ExperienceType {
        self.experience_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn start_date(&self) -> Date {
        self.start_date
    }

    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn display_order(&self) -> u32 {
        self.display_order
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullet(&self, id: &BulletId) -> Option<&Bullet> {
        self.bullets.iter().find(|b| b.id() == id)
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Months between start and end (or `as_of` for current entries).
    pub fn duration_months(&self, as_of: Date) -> u32 {
        let end = self.end_date.unwrap_or(as_of);
        self.start_date.months_until(&end)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets the date range, enforcing `end >= start` and current/end exclusivity.
    ///
    /// A zero end date is treated as "no end date".
    pub fn set_dates(
        &mut self,
        start_date: Date,
        end_date: Option<Date>,
        is_current: bool,
    ) -> Result<(), ValidationError> {
        if start_date.is_zero() {
            return Err(ValidationError::empty_field("start_date"));
        }
        let end_date = end_date.filter(|d| !d.is_zero());
        if is_current && end_date.is_some() {
            return Err(ValidationError::EndDateOnCurrent);
        }
        if let Some(end) = end_date {
            if end.before(&start_date) {
                return Err(ValidationError::InvalidDateRange {
                    start: start_date.to_string(),
                    end: end.to_string(),
                });
            }
        }

        self.start_date = start_date;
        self.end_date = end_date;
        self.is_current = is_current;
        self.touch();
        Ok(())
    }

    pub fn set_location(&mut self, location: Option<String>) {
        self.location = location.filter(|l| !l.trim().is_empty());
        self.touch();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description.filter(|d| !d.trim().is_empty());
        self.touch();
    }

    pub fn set_display_order(&mut self, order: u32) {
        self.display_order = order;
        self.touch();
    }

    pub fn rename(
        &mut self,
        title: impl Into<String>,
        organization: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let title = non_empty("title", title.into())?;
        let organization = non_empty("organization", organization.into())?;
        self.title = title;
        self.organization = organization;
        self.touch();
        Ok(())
    }

    /// Appends a new bullet and returns it.
    pub fn add_bullet(&mut self, content: impl Into<String>) -> Result<&Bullet, ValidationError> {
        // orders may have gaps after removals
        let order = self
            .bullets
            .iter()
            .map(|b| b.display_order() + 1)
            .max()
            .unwrap_or(0);
        let bullet = Bullet::new(BulletId::new(), self.id, content, order)?;
        self.bullets.push(bullet);
        self.touch();
        Ok(&self.bullets[self.bullets.len() - 1])
    }

    /// Attaches an already-built bullet, rejecting one owned elsewhere.
    pub fn attach_bullet(&mut self, bullet: Bullet) -> Result<(), ValidationError> {
        if bullet.experience_id() != &self.id {
            return Err(ValidationError::invalid_format(
                "experience_id",
                "bullet belongs to a different experience",
            ));
        }
        if self.bullet(bullet.id()).is_some() {
            return Err(ValidationError::invalid_format("bullet_id", "duplicate bullet"));
        }
        self.bullets.push(bullet);
        self.touch();
        Ok(())
    }

    /// Mutable access to a bullet for user edits.
    pub fn bullet_mut(&mut self, id: &BulletId) -> Option<&mut Bullet> {
        self.updated_at = Timestamp::now();
        self.bullets.iter_mut().find(|b| b.id() == id)
    }

    /// Removes a bullet, returning it if it was present.
    pub fn remove_bullet(&mut self, id: &BulletId) -> Option<Bullet> {
        let index = self.bullets.iter().position(|b| b.id() == id)?;
        let removed = self.bullets.remove(index);
        self.touch();
        Some(removed)
    }

    /// Reorders bullets; `order` must be a permutation of the current ids.
    pub fn reorder_bullets(&mut self, order: &[BulletId]) -> Result<(), ValidationError> {
        let is_permutation = order.len() == self.bullets.len()
            && order.iter().all(|id| self.bullet(id).is_some())
            && order
                .iter()
                .enumerate()
                .all(|(i, id)| !order[..i].contains(id));
        if !is_permutation {
            return Err(ValidationError::invalid_format(
                "bullet_order",
                "order must list every bullet exactly once",
            ));
        }

        for (position, id) in order.iter().enumerate() {
            if let Some(bullet) = self.bullets.iter_mut().find(|b| b.id() == id) {
                bullet.set_display_order(position as u32);
            }
        }
        self.bullets.sort_by_key(|b| b.display_order());
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

fn non_empty(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn test_experience() -> Experience {
        Experience::new(
            ExperienceId::new(),
            UserId::new("user-1").unwrap(),
            ExperienceType::Work,
            "Backend Engineer",
            "Acme",
            date("2020-01-01"),
        )
        .unwrap()
    }

    #[test]
    fn new_experience_is_current_without_end() {
        let exp = test_experience();
        assert!(exp.is_current());
        assert!(exp.end_date().is_none());
    }

    #[test]
    fn rejects_empty_organization() {
        let result = Experience::new(
            ExperienceId::new(),
            UserId::new("user-1").unwrap(),
            ExperienceType::Work,
            "Engineer",
            " ",
            date("2020-01-01"),
        );
        assert_eq!(result.unwrap_err(), ValidationError::empty_field("organization"));
    }

    #[test]
    fn rejects_end_before_start() {
        let mut exp = test_experience();
        let err = exp
            .set_dates(date("2021-01-01"), Some(date("2020-12-31")), false)
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDateRange { .. }));
        assert_eq!(exp.start_date(), date("2020-01-01"));
    }

    #[test]
    fn rejects_current_with_end_date() {
        let mut exp = test_experience();
        let err = exp
            .set_dates(date("2020-01-01"), Some(date("2021-01-01")), true)
            .unwrap_err();
        assert_eq!(err, ValidationError::EndDateOnCurrent);
    }

    #[test]
    fn same_day_range_is_valid() {
        let mut exp = test_experience();
        exp.set_dates(date("2020-01-01"), Some(date("2020-01-01")), false)
            .unwrap();
        assert!(!exp.is_current());
    }

    #[test]
    fn zero_end_date_counts_as_none() {
        let mut exp = test_experience();
        exp.set_dates(date("2020-01-01"), Some(Date::ZERO), true).unwrap();
        assert!(exp.end_date().is_none());
    }

    #[test]
    fn bullets_are_owned_and_ordered() {
        let mut exp = test_experience();
        let first = *exp.add_bullet("Built the ingest pipeline").unwrap().id();
        let second = *exp.add_bullet("Mentored two engineers").unwrap().id();

        assert_eq!(exp.bullets()[0].experience_id(), exp.id());
        exp.reorder_bullets(&[second, first]).unwrap();
        assert_eq!(exp.bullets()[0].id(), &second);
        assert_eq!(exp.bullets()[1].display_order(), 1);
    }

    #[test]
    fn reorder_rejects_partial_lists() {
        let mut exp = test_experience();
        let first = *exp.add_bullet("A").unwrap().id();
        exp.add_bullet("B").unwrap();
        assert!(exp.reorder_bullets(&[first]).is_err());
        assert!(exp.reorder_bullets(&[first, first]).is_err());
    }

    #[test]
    fn remove_bullet_returns_removed() {
        let mut exp = test_experience();
        let id = *exp.add_bullet("Something").unwrap().id();
        assert!(exp.remove_bullet(&id).is_some());
        assert!(exp.remove_bullet(&id).is_none());
        assert!(exp.bullets().is_empty());
    }

    #[test]
    fn attach_rejects_foreign_bullet() {
        let mut exp = test_experience();
        let foreign = Bullet::new(BulletId::new(), ExperienceId::new(), "x", 0).unwrap();
        assert!(exp.attach_bullet(foreign).is_err());
    }

    #[test]
    fn duration_uses_as_of_for_current() {
        let exp = test_experience();
        assert_eq!(exp.duration_months(date("2021-07-01")), 18);
    }

    #[test]
    fn add_after_remove_does_not_reuse_an_order() {
        let mut exp = test_experience();
        let first = *exp.add_bullet("one").unwrap().id();
        exp.add_bullet("two").unwrap();
        exp.add_bullet("three").unwrap();

        exp.remove_bullet(&first).unwrap();
        let added = exp.add_bullet("four").unwrap().display_order();

        let orders: Vec<u32> = exp.bullets().iter().map(|b| b.display_order()).collect();
        assert_eq!(added, 3);
        assert_eq!(orders, vec![1, 2, 3]);
    }
}
