//! Application handlers.
//!
//! Command handlers that orchestrate domain operations through ports.

pub mod resume;

pub use resume::{
    CreateResumeCommand, CreateResumeHandler, CreateResumeResult, DeleteBulletCommand,
    DeleteBulletHandler, DeleteBulletResult, TailorResumeCommand, TailorResumeHandler,
    TailorResumeResult, UpdateResumeStatusCommand, UpdateResumeStatusHandler,
    UpdateResumeStatusResult,
};
