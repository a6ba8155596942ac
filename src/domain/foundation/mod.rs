//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and error
//! types that form the vocabulary of the resume domain.

mod date;
mod errors;
mod ids;
mod score;
mod state_machine;
mod target_language;
mod timestamp;

pub use date::Date;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BulletId, ExperienceId, LanguageId, ResumeId, SkillId, UserId};
pub use score::{ImpactScore, MatchScore, ProficiencyLevel, SCORE_MAX, SCORE_MIN};
pub use state_machine::StateMachine;
pub use target_language::TargetLanguage;
pub use timestamp::Timestamp;
