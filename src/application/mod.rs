//! Application layer - Commands, Handlers and the tailoring orchestrator.
//!
//! This layer coordinates domain operations between ports. The
//! [`ResumeTailor`] runs the AI pipeline; handlers wrap it with loading,
//! authorization and persistence.

pub mod handlers;
pub mod tailoring;

pub use handlers::{
    CreateResumeCommand, CreateResumeHandler, CreateResumeResult, DeleteBulletCommand,
    DeleteBulletHandler, DeleteBulletResult, TailorResumeCommand, TailorResumeHandler,
    TailorResumeResult, UpdateResumeStatusCommand, UpdateResumeStatusHandler,
    UpdateResumeStatusResult,
};
pub use tailoring::{ResumeTailor, TailoringOutcome};
