//! Tailoring domain module.
//!
//! Ephemeral values exchanged between the orchestrator and the AI port:
//! job analysis, selections, rewrites, summaries and scores. None of these
//! are persisted on their own.

mod candidates;
mod job_analysis;
mod options;
mod results;

pub use candidates::CandidatePool;
pub use job_analysis::{JobAnalysis, SeniorityLevel};
pub use options::{
    TailoringOptions, TailoringStyle, DEFAULT_MAX_BULLETS, DEFAULT_MAX_BULLETS_PER_EXPERIENCE,
    DEFAULT_TAILOR_CONCURRENCY,
};
pub use results::{
    BulletSelection, MatchResult, SummaryResult, TailoredBulletResult, MAX_TAILORED_KEYWORDS,
};
