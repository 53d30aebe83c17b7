// Shared prompt fragments for every LaTeX rewrite sent to the LLM.
// Mode-specific instructions live in generation/prompts.rs.

/// Never claim anything the source resume does not support.
pub const TRUTHFULNESS_INSTRUCTION: &str = "\
- Do NOT invent experience, metrics, tools, or claims not supported by the original resume text.";

/// The output is compiled as-is, so it must stay valid LaTeX.
pub const LATEX_VALIDITY_INSTRUCTION: &str = "\
- Preserve LaTeX validity. Do not break braces or commands.";

pub const SPECIFICITY_INSTRUCTION: &str = "\
- Prefer concrete technical specificity (tools, interfaces, constraints, validation) over vague claims.
- Avoid fluff: do not add generic collaboration/communication lines unless already present.
- Keep overall layout similar; adjust bullets and skills for alignment.";

pub const ONE_PAGE_INSTRUCTION: &str = "\
- HARD CONSTRAINT: Output must fit on ONE page when compiled to PDF.";

pub const NO_NEW_SECTIONS_INSTRUCTION: &str = "\
- Do NOT add new sections. Avoid adding new bullets; prefer rewriting/condensing existing bullets.";

/// Appended to every user prompt so the reply can be compiled directly.
pub const LATEX_ONLY_OUTPUT: &str = "\
Return ONLY valid LaTeX source.
You MUST include the full document from \\documentclass ... through \\end{document}.
Do NOT include any explanation or markdown.";
