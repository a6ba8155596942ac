//! The set of bullets a tailoring run may choose from.

use std::collections::{HashMap, HashSet};

use crate::domain::experience::{Bullet, Experience};
use crate::domain::foundation::{BulletId, ExperienceId};
use crate::domain::resume::{TailoredBullet, TailoredExperience};

use super::{TailoredBulletResult, TailoringOptions};

/// Experiences visible to the generating user, in presentation order.
///
/// Experiences are ordered by `display_order`, ties broken by most recent
/// start date. Bullets keep their experience's internal order.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    experiences: Vec<Experience>,
    owner_of: HashMap<BulletId, ExperienceId>,
}

impl CandidatePool {
    /// Builds the pool, keeping only experience types the options allow.
    pub fn new(experiences: Vec<Experience>, options: &TailoringOptions) -> Self {
        let mut experiences: Vec<Experience> = experiences
            .into_iter()
            .filter(|e| options.includes(e.experience_type()))
            .collect();
        experiences.sort_by(|a, b| {
            a.display_order()
                .cmp(&b.display_order())
                .then_with(|| b.start_date().cmp(&a.start_date()))
        });

        let owner_of = experiences
            .iter()
            .flat_map(|e| e.bullets().iter().map(move |b| (*b.id(), *e.id())))
            .collect();

        Self {
            experiences,
            owner_of,
        }
    }

    pub fn experiences(&self) -> &[Experience] {
        &self.experiences
    }

    /// Every candidate bullet, in presentation order.
    pub fn bullets(&self) -> Vec<Bullet> {
        self.experiences
            .iter()
            .flat_map(|e| e.bullets().iter().cloned())
            .collect()
    }

    pub fn ids(&self) -> HashSet<BulletId> {
        self.owner_of.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.owner_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner_of.is_empty()
    }

    pub fn contains(&self, id: &BulletId) -> bool {
        self.owner_of.contains_key(id)
    }

    pub fn bullet(&self, id: &BulletId) -> Option<&Bullet> {
        let owner = self.owner_of.get(id)?;
        self.experiences
            .iter()
            .find(|e| e.id() == owner)
            .and_then(|e| e.bullet(id))
    }

    pub fn experience_of(&self, id: &BulletId) -> Option<&ExperienceId> {
        self.owner_of.get(id)
    }

    /// Walks `ids` in order and keeps at most `max` per experience.
    pub fn cap_per_experience(&self, ids: &[BulletId], max: usize) -> Vec<BulletId> {
        let mut taken: HashMap<ExperienceId, usize> = HashMap::new();
        ids.iter()
            .copied()
            .filter(|id| match self.owner_of.get(id) {
                Some(owner) => {
                    let count = taken.entry(*owner).or_insert(0);
                    *count += 1;
                    *count <= max
                }
                None => false,
            })
            .collect()
    }

    /// Groups tailored bullets under their experiences.
    ///
    /// Experiences follow pool order; bullets within one experience follow
    /// the order of `tailored`. Experiences without bullets are omitted.
    pub fn group(&self, tailored: &[TailoredBulletResult]) -> Vec<TailoredExperience> {
        self.experiences
            .iter()
            .filter_map(|experience| {
                let bullets: Vec<TailoredBullet> = tailored
                    .iter()
                    .filter(|t| self.owner_of.get(t.bullet_id()) == Some(experience.id()))
                    .map(|t| TailoredBullet {
                        bullet_id: *t.bullet_id(),
                        original_content: experience
                            .bullet(t.bullet_id())
                            .map(|b| b.content().to_string())
                            .unwrap_or_default(),
                        tailored_content: t.content().to_string(),
                        keywords: t.keywords_used().to_vec(),
                    })
                    .collect();
                if bullets.is_empty() {
                    return None;
                }
                Some(TailoredExperience {
                    experience_id: *experience.id(),
                    title: experience.title().to_string(),
                    organization: experience.organization().to_string(),
                    location: experience.location().map(str::to_string),
                    start_date: experience.start_date(),
                    end_date: experience.end_date(),
                    is_current: experience.is_current(),
                    bullets,
                })
            })
            .collect()
    }
}
