//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## AI Ports
//!
//! - `AIProvider` - Raw text completion against an LLM
//! - `ResumeAI` - The five tailoring capabilities the orchestrator consumes
//!
//! ## Persistence Ports
//!
//! - `ResumeRepository` - Resume aggregate persistence
//! - `ProfileReader` - Candidate profile, experiences, skills, languages
//! - `ExperienceRepository` - Experience (and bullet) writes
//!
//! ## External Collaborators
//!
//! - `PdfRenderer`, `JobPostingFetcher`, `TokenVerifier`, `FileStorage`

mod ai_provider;
mod external;
mod profile_reader;
mod resume_ai;
mod resume_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use external::{
    ExternalServiceError, FileStorage, JobPostingFetcher, PdfRenderer, TokenClaims,
    TokenVerifier,
};
pub use profile_reader::{ExperienceRepository, ProfileReader};
pub use resume_ai::{CallContext, ResumeAI, ResumeAIError};
pub use resume_repository::ResumeRepository;
