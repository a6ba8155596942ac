//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `experience` - Experiences and the atomic bullets they own
//! - `profile` - Candidate profile, skills and spoken languages
//! - `resume` - Resume aggregate, lifecycle and generated content
//! - `tailoring` - Ephemeral values exchanged with the AI port

pub mod experience;
pub mod foundation;
pub mod profile;
pub mod resume;
pub mod tailoring;
