//! In-memory ResumeRepository.
//!
//! Useful for tests, the CLI and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ResumeId, UserId};
use crate::domain::resume::Resume;
use crate::ports::ResumeRepository;

/// Resume store backed by a shared map. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResumeRepository {
    resumes: Arc<RwLock<HashMap<ResumeId, Resume>>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryResumeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save`/`update` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.resumes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.resumes.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.resumes.write().await.clear();
    }
}

fn not_found(id: &ResumeId) -> DomainError {
    DomainError::new(ErrorCode::ResumeNotFound, format!("Resume not found: {}", id))
        .with_detail("resume_id", id.to_string())
}

#[async_trait]
impl ResumeRepository for InMemoryResumeRepository {
    async fn save(&self, resume: &Resume) -> Result<(), DomainError> {
        let mut resumes = self.resumes.write().await;
        if resumes.contains_key(resume.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Resume already exists: {}", resume.id()),
            ));
        }
        resumes.insert(*resume.id(), resume.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update(&self, resume: &Resume) -> Result<(), DomainError> {
        let mut resumes = self.resumes.write().await;
        match resumes.get_mut(resume.id()) {
            Some(stored) => {
                *stored = resume.clone();
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            None => Err(not_found(resume.id())),
        }
    }

    async fn find_by_id(&self, id: &ResumeId) -> Result<Option<Resume>, DomainError> {
        Ok(self.resumes.read().await.get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Resume>, DomainError> {
        let mut owned: Vec<Resume> = self
            .resumes
            .read()
            .await
            .values()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(owned)
    }

    async fn delete(&self, id: &ResumeId) -> Result<(), DomainError> {
        match self.resumes.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TargetLanguage;

    fn resume(user: &str) -> Resume {
        Resume::new(
            ResumeId::new(),
            UserId::new(user).unwrap(),
            "Senior Go Engineer",
            TargetLanguage::english(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_then_find() {
        let repo = InMemoryResumeRepository::new();
        let resume = resume("u-1");

        repo.save(&resume).await.unwrap();

        let found = repo.find_by_id(resume.id()).await.unwrap().unwrap();
        assert_eq!(found.id(), resume.id());
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_save_fails() {
        let repo = InMemoryResumeRepository::new();
        let resume = resume("u-1");
        repo.save(&resume).await.unwrap();

        let err = repo.save(&resume).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let repo = InMemoryResumeRepository::new();
        let err = repo.update(&resume("u-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResumeNotFound);
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn find_by_user_filters_owner() {
        let repo = InMemoryResumeRepository::new();
        repo.save(&resume("u-1")).await.unwrap();
        repo.save(&resume("u-1")).await.unwrap();
        repo.save(&resume("u-2")).await.unwrap();

        let owned = repo
            .find_by_user_id(&UserId::new("u-1").unwrap())
            .await
            .unwrap();
        assert_eq!(owned.len(), 2);
    }

    #[tokio::test]
    async fn delete_removes() {
        let repo = InMemoryResumeRepository::new();
        let resume = resume("u-1");
        repo.save(&resume).await.unwrap();

        repo.delete(resume.id()).await.unwrap();

        assert!(repo.is_empty().await);
        assert!(repo.delete(resume.id()).await.is_err());
    }
}
