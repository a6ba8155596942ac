//! Resume command handlers.

mod create_resume;
mod delete_bullet;
mod tailor_resume;
mod update_resume_status;

pub use create_resume::{CreateResumeCommand, CreateResumeHandler, CreateResumeResult};
pub use delete_bullet::{DeleteBulletCommand, DeleteBulletHandler, DeleteBulletResult};
pub use tailor_resume::{TailorResumeCommand, TailorResumeHandler, TailorResumeResult};
pub use update_resume_status::{
    UpdateResumeStatusCommand, UpdateResumeStatusHandler, UpdateResumeStatusResult,
};
