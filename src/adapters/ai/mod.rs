//! AI Adapters.
//!
//! Implementations of the AIProvider and ResumeAI ports.
//!
//! ## Available Adapters
//!
//! - `AnthropicProvider` - Anthropic Messages API over reqwest
//! - `MockAIProvider` - Configurable mock provider for testing
//! - `LlmResumeAI` - ResumeAI over any AIProvider (prompts + tolerant JSON decoding)
//! - `ResilientResumeAI` - Decorator adding retry with exponential backoff
//! - `ScriptedResumeAI` - Deterministic keyword-overlap backend for tests and offline runs

mod anthropic_provider;
mod json_extraction;
mod llm_resume_ai;
mod mock_provider;
mod prompts;
mod resilient_resume_ai;
mod retry;
mod scripted_resume_ai;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use json_extraction::{extract_json, parse_json_response, JsonExtractionError};
pub use llm_resume_ai::LlmResumeAI;
pub use mock_provider::{MockAIProvider, MockResponse};
pub use resilient_resume_ai::ResilientResumeAI;
pub use retry::{call_with_retry, RetryPolicy};
pub use scripted_resume_ai::ScriptedResumeAI;
