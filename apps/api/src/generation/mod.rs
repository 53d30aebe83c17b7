// Generation Adapter: mode-specific LaTeX rewrites through the LLM.
// All LLM calls go through llm_client; nothing here talks to Anthropic directly.

pub mod generator;
pub mod mode;
pub mod prompts;

pub use generator::{GenerationError, LlmResumeGenerator, ResumeGenerator};
pub use mode::GenerationMode;
