//! Experience domain module.
//!
//! Experiences are the containers a user maintains; bullets are the atomic
//! statements the tailoring pipeline selects and rewrites.

mod bullet;
mod experience;
mod experience_type;

pub use bullet::{Bullet, MAX_CONTENT_LENGTH};
pub use experience::Experience;
pub use experience_type::ExperienceType;
