//! Profile domain module - the candidate and their scoring inputs.

mod candidate;
mod skill;
mod spoken_language;

pub use candidate::CandidateProfile;
pub use skill::Skill;
pub use spoken_language::{LanguageProficiency, SpokenLanguage};
