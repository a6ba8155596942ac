//! Narrow contracts for collaborators outside the tailoring core.
//!
//! PDF rendering, job-posting retrieval, token verification and file
//! storage are consumed only through these traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{Timestamp, UserId};

/// Failures shared by the external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExternalServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl ExternalServiceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// True for failures a caller may retry later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Renders resume HTML into PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, ExternalServiceError>;
}

/// Fetches a job posting URL and returns its text as markdown.
#[async_trait]
pub trait JobPostingFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ExternalServiceError>;
}

/// Claims extracted from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub expires_at: Timestamp,
}

impl TokenClaims {
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        !self.expires_at.is_after(now)
    }
}

/// Verifies an access token.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<TokenClaims, ExternalServiceError>;
}

/// Stores bytes (e.g. rendered PDFs) and returns a retrievable URL.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn store(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ExternalServiceError>;

    async fn delete(&self, key: &str) -> Result<(), ExternalServiceError>;
}
