//! Resume repository port (write side).
//!
//! Defines the contract for persisting and retrieving Resume aggregates.
//! The tailoring core is agnostic to the storage technology behind it.

use crate::domain::foundation::{DomainError, ResumeId, UserId};
use crate::domain::resume::Resume;
use async_trait::async_trait;

/// Repository port for Resume aggregate persistence.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Save a new resume.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, resume: &Resume) -> Result<(), DomainError>;

    /// Update an existing resume.
    ///
    /// # Errors
    ///
    /// - `ResumeNotFound` if the resume doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, resume: &Resume) -> Result<(), DomainError>;

    /// Find a resume by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ResumeId) -> Result<Option<Resume>, DomainError>;

    /// Find all resumes owned by a user, most recently updated first.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Resume>, DomainError>;

    /// Delete a resume. This is an explicit user action, never done by the pipeline.
    ///
    /// # Errors
    ///
    /// - `ResumeNotFound` if the resume doesn't exist
    async fn delete(&self, id: &ResumeId) -> Result<(), DomainError>;
}
