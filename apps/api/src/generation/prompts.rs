// LLM prompt constants for LaTeX resume rewrites.
// Reuses the cross-cutting hard rules from llm_client::prompts.

use once_cell::sync::Lazy;

use crate::llm_client::prompts::{
    LATEX_VALIDITY_INSTRUCTION, NO_NEW_SECTIONS_INSTRUCTION, ONE_PAGE_INSTRUCTION,
    SPECIFICITY_INSTRUCTION, TRUTHFULNESS_INSTRUCTION,
};

/// System prompt shared by every generation mode.
pub static GENERATION_SYSTEM: Lazy<String> = Lazy::new(|| {
    format!(
        "You are an assistant that edits LaTeX resumes for job alignment.\n\n\
         Hard rules:\n{TRUTHFULNESS_INSTRUCTION}\n{LATEX_VALIDITY_INSTRUCTION}\n\
         {SPECIFICITY_INSTRUCTION}\n{ONE_PAGE_INSTRUCTION}\n{NO_NEW_SECTIONS_INSTRUCTION}"
    )
});

pub const DEFAULT_INSTRUCTIONS: &str = "\
Make the resume more aligned to the job description while staying truthful.
Improve bullet specificity and add relevant keywords ONLY if supported by resume.
Ensure the output can fit on one page by keeping bullets concise.";

pub const DEPTH_INSTRUCTIONS: &str = "\
Increase technical depth WITHOUT adding fluff:
- Add implementation details (interfaces, components, constraints, tools) ONLY if implied by existing resume.
- Add validation/testing language ONLY if implied (e.g., \"validated\", \"bench\", \"debugged\").
- Prefer specifying mechanisms over general outcomes.
- Do not add soft-skill filler.
Keep it one-page: do not increase bullet count; shorten wording if needed.";

pub const TIGHTEN_INSTRUCTIONS: &str = "\
The resume exceeds one page. Tighten it to fit on ONE PAGE when compiled.

Rules:
- Do NOT add new bullets or sections.
- Prefer removing weakest/least relevant bullets first (older/less aligned).
- Shorten bullets aggressively (remove adjectives, compress clauses).
- Keep formatting/template intact (do not change margins/font sizes unless already present).
- Keep bullets to ~1 line when possible.";

pub const EXPAND_INSTRUCTIONS: &str = "\
The resume is underfilled (too much whitespace) but must remain ONE PAGE.

Rules:
- Do NOT add new experience or claims.
- You may slightly expand bullets by adding technical mechanisms, constraints, validation steps ONLY if already implied by the resume.
- Prefer improving specificity over adding new bullets.
- If adding length, do it evenly across the most relevant sections.
- Do NOT change margins/font sizes.";
