//! Resume-specific error types.

use thiserror::Error;

use super::ResumeStatus;
use crate::domain::foundation::{
    BulletId, DomainError, ErrorCode, ResumeId, UserId, ValidationError,
};

/// Text shown to users whenever an AI step fails, whatever the cause.
pub const TAILORING_FAILED_MESSAGE: &str = "Could not generate tailored resume, please retry.";

/// Errors surfaced by resume use cases.
///
/// `Display` carries internal detail for logs; callers facing end users
/// should render [`ResumeError::user_message`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResumeError {
    #[error("Resume not found: {0}")]
    NotFound(ResumeId),

    #[error("Bullet not found: {0}")]
    BulletNotFound(BulletId),

    #[error("Profile not found for user {0}")]
    ProfileNotFound(UserId),

    #[error("Permission denied")]
    Forbidden,

    #[error("Cannot transition resume from {from} to {to}")]
    InvalidStatusTransition { from: ResumeStatus, to: ResumeStatus },

    #[error("Unknown resume status '{0}'")]
    InvalidResumeStatus(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("AI service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("AI returned malformed output: {0}")]
    MalformedOutput(String),

    #[error("Tailoring cancelled")]
    Cancelled,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ResumeError {
    pub fn not_found(id: ResumeId) -> Self {
        ResumeError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ResumeError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ResumeError::Infrastructure(message.into())
    }

    /// Internal code distinguishing failure classes for observability.
    pub fn code(&self) -> ErrorCode {
        match self {
            ResumeError::NotFound(_) => ErrorCode::ResumeNotFound,
            ResumeError::BulletNotFound(_) => ErrorCode::BulletNotFound,
            ResumeError::ProfileNotFound(_) => ErrorCode::ProfileNotFound,
            ResumeError::Forbidden => ErrorCode::Forbidden,
            ResumeError::InvalidStatusTransition { .. } => ErrorCode::InvalidStatusTransition,
            ResumeError::InvalidResumeStatus(_) => ErrorCode::InvalidResumeStatus,
            ResumeError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ResumeError::ServiceUnavailable(_) => ErrorCode::AIServiceUnavailable,
            ResumeError::MalformedOutput(_) => ErrorCode::AIMalformedOutput,
            ResumeError::Cancelled => ErrorCode::Cancelled,
            ResumeError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// True when the failure came from the AI pipeline.
    pub fn is_tailoring_failure(&self) -> bool {
        matches!(
            self,
            ResumeError::ServiceUnavailable(_)
                | ResumeError::MalformedOutput(_)
                | ResumeError::Cancelled
        )
    }

    /// End-user text. Never includes backend error detail.
    pub fn user_message(&self) -> String {
        match self {
            _ if self.is_tailoring_failure() => TAILORING_FAILED_MESSAGE.to_string(),
            ResumeError::NotFound(_) => "Resume not found".to_string(),
            ResumeError::BulletNotFound(_) => "Bullet not found".to_string(),
            ResumeError::ProfileNotFound(_) => "Profile not found".to_string(),
            ResumeError::Infrastructure(_) => "Something went wrong, please retry.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for ResumeError {
    fn from(err: ValidationError) -> Self {
        ResumeError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ResumeError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ResumeNotFound => err
                .detail("resume_id")
                .and_then(|id| id.parse().ok())
                .map(ResumeError::NotFound)
                .unwrap_or_else(|| ResumeError::Infrastructure(err.to_string())),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => ResumeError::Forbidden,
            ErrorCode::InvalidStatusTransition => {
                let from = err.detail("from").and_then(|s| s.parse().ok());
                let to = err.detail("to").and_then(|s| s.parse().ok());
                match (from, to) {
                    (Some(from), Some(to)) => ResumeError::InvalidStatusTransition { from, to },
                    _ => ResumeError::Infrastructure(err.to_string()),
                }
            }
            ErrorCode::InvalidResumeStatus => ResumeError::InvalidResumeStatus(
                err.detail("value").unwrap_or_default().to_string(),
            ),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat
            | ErrorCode::InvalidDateFormat
            | ErrorCode::InvalidDateRange => ResumeError::ValidationFailed {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => ResumeError::Infrastructure(err.to_string()),
        }
    }
}
