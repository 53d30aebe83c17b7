//! Resume Generator: one LaTeX rewrite per call, in a given `GenerationMode`.
//!
//! Flow: build prompt (mode instructions + output rules + JD + resume) → LLM →
//!       strip code fences → repair document boundaries → return LaTeX.
//!
//! The orchestrator only sees the `ResumeGenerator` trait, so the tailoring loop
//! can be driven by scripted fakes in tests.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::generation::mode::GenerationMode;
use crate::generation::prompts::GENERATION_SYSTEM;
use crate::llm_client::prompts::LATEX_ONLY_OUTPUT;
use crate::llm_client::{strip_code_fences, LlmClient, LlmError};

const DOCUMENT_CLASS: &str = "\\documentclass";
const BEGIN_DOCUMENT: &str = "\\begin{document}";
const END_DOCUMENT: &str = "\\end{document}";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation backend failed: {0}")]
    Backend(#[from] LlmError),

    #[error("generation backend returned only whitespace")]
    EmptyOutput,
}

/// Produces a rewritten LaTeX document for the given job description and mode.
///
/// Implementations must never return structurally unparseable output: the result
/// always contains `\begin{document}` … `\end{document}`.
#[async_trait]
pub trait ResumeGenerator: Send + Sync {
    async fn generate(
        &self,
        document: &str,
        job_text: &str,
        mode: GenerationMode,
    ) -> Result<String, GenerationError>;
}

/// Production generator backed by the Anthropic Messages API.
pub struct LlmResumeGenerator {
    llm: LlmClient,
}

impl LlmResumeGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeGenerator for LlmResumeGenerator {
    async fn generate(
        &self,
        document: &str,
        job_text: &str,
        mode: GenerationMode,
    ) -> Result<String, GenerationError> {
        let prompt = build_prompt(document, job_text, mode);
        debug!(%mode, prompt_chars = prompt.len(), "Sending rewrite request");

        let raw = self.llm.complete(&prompt, &GENERATION_SYSTEM).await?;
        if raw.trim().is_empty() {
            return Err(GenerationError::EmptyOutput);
        }

        let latex = ensure_document(&raw);
        info!(%mode, output_chars = latex.len(), "Rewrite received");
        Ok(latex)
    }
}

/// Builds the user prompt for one rewrite.
pub fn build_prompt(document: &str, job_text: &str, mode: GenerationMode) -> String {
    format!(
        "{instructions}\n\n{LATEX_ONLY_OUTPUT}\n\n\
         === JOB DESCRIPTION ===\n{job}\n\n\
         === ORIGINAL RESUME (LATEX) ===\n{resume}",
        instructions = mode.instructions(),
        job = job_text.trim(),
        resume = document.trim(),
    )
}

/// Normalizes raw model output into a compilable document.
///
/// 1. Both `\begin{document}` and `\end{document}` present → returned as-is.
/// 2. `\documentclass` followed later by `\end{document}` → truncated to that span,
///    discarding surrounding commentary.
/// 3. Otherwise → wrapped in a minimal `article` document.
pub fn ensure_document(raw: &str) -> String {
    let text = strip_code_fences(raw);

    if text.contains(BEGIN_DOCUMENT) && text.contains(END_DOCUMENT) {
        return text.to_string();
    }

    if let (Some(start), Some(end)) = (text.find(DOCUMENT_CLASS), text.rfind(END_DOCUMENT)) {
        if end > start {
            return text[start..end + END_DOCUMENT.len()].to_string();
        }
    }

    warn!(
        chars = text.len(),
        "Model output lacks document markers; wrapping in minimal boilerplate"
    );
    format!("{DOCUMENT_CLASS}{{article}}{BEGIN_DOCUMENT}\n{text}\n{END_DOCUMENT}")
}
