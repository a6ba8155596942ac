//! Resume domain module.
//!
//! A resume is created in `draft` from a job description, filled by a
//! tailoring run, then walked by its owner through the application outcome.

mod aggregate;
mod content;
mod errors;
mod status;

pub use aggregate::{Resume, MAX_JOB_DESCRIPTION_LENGTH};
pub use content::{
    ResumeAnalysis, ResumeContent, ScoreBreakdown, TailoredBullet, TailoredExperience,
};
pub use errors::{ResumeError, TAILORING_FAILED_MESSAGE};
pub use status::ResumeStatus;
