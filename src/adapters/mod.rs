//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text-generation providers and ResumeAI backends
//! - `memory` - In-memory persistence for resumes and profiles

pub mod ai;
pub mod memory;

pub use ai::{
    AnthropicConfig, AnthropicProvider, LlmResumeAI, MockAIProvider, ResilientResumeAI,
    RetryPolicy, ScriptedResumeAI,
};
pub use memory::{InMemoryProfileStore, InMemoryResumeRepository, ProfileDocument};
