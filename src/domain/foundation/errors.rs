//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object and entity construction.
///
/// Every variant is attributed to a field so callers can surface it next to
/// the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' is not a valid YYYY-MM-DD date: '{value}'")]
    InvalidDateFormat { field: String, value: String },

    #[error("End date {end} is before start date {start}")]
    InvalidDateRange { start: String, end: String },

    #[error("A current experience cannot have an end date")]
    EndDateOnCurrent,
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid date format error.
    pub fn invalid_date_format(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::InvalidDateFormat {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns the field this error is attributed to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::InvalidDateFormat { field, .. } => field,
            ValidationError::InvalidDateRange { .. } => "end_date",
            ValidationError::EndDateOnCurrent => "end_date",
        }
    }

    /// Returns the error code matching this validation failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::InvalidDateFormat { .. } => ErrorCode::InvalidDateFormat,
            ValidationError::InvalidDateRange { .. } | ValidationError::EndDateOnCurrent => {
                ErrorCode::InvalidDateRange
            }
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    InvalidDateFormat,
    InvalidDateRange,

    // Not found errors
    ResumeNotFound,
    ExperienceNotFound,
    BulletNotFound,
    ProfileNotFound,

    // State errors
    InvalidStatusTransition,
    InvalidResumeStatus,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // AI errors
    AIServiceUnavailable,
    AIMalformedOutput,
    Cancelled,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidDateFormat => "INVALID_DATE_FORMAT",
            ErrorCode::InvalidDateRange => "INVALID_DATE_RANGE",
            ErrorCode::ResumeNotFound => "RESUME_NOT_FOUND",
            ErrorCode::ExperienceNotFound => "EXPERIENCE_NOT_FOUND",
            ErrorCode::BulletNotFound => "BULLET_NOT_FOUND",
            ErrorCode::ProfileNotFound => "PROFILE_NOT_FOUND",
            ErrorCode::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            ErrorCode::InvalidResumeStatus => "INVALID_RESUME_STATUS",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::AIServiceUnavailable => "AI_SERVICE_UNAVAILABLE",
            ErrorCode::AIMalformedOutput => "AI_MALFORMED_OUTPUT",
            ErrorCode::Cancelled => "CANCELLED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns a detail value if present.
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(err.code(), err.to_string()).with_detail("field", err.field())
    }
}
