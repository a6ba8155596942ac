//! In-memory adapters.
//!
//! Shared-state implementations of the persistence ports for tests, the
//! CLI and local development.

mod profile_document;
mod profile_store;
mod resume_repository;

pub use profile_document::{
    BulletEntry, ExperienceEntry, LanguageEntry, ProfileDocument, SkillEntry,
};
pub use profile_store::InMemoryProfileStore;
pub use resume_repository::InMemoryResumeRepository;
