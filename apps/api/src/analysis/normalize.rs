//! Text Normalizer: best-effort LaTeX stripping and `\resumeItem{...}` extraction.
//!
//! Both functions are infallible: malformed markup yields partially stripped text,
//! never an error. The output is only used for heuristics (word counts, scoring).

use once_cell::sync::Lazy;
use regex::Regex;

/// A control sequence with an optional `*`, one optional `[...]` and one optional `{...}`.
static COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-zA-Z]+\*?(?:\[[^\]]*\])?(?:\{[^}]*\})?").expect("valid regex"));

static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}\\]").expect("valid regex"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// `\resumeItem{...}`, non-greedy, newlines allowed inside the argument.
static RESUME_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\resumeItem\{(.+?)\}").expect("valid regex"));

/// Removes control sequences and grouping delimiters, then collapses whitespace.
pub fn strip_markup(text: &str) -> String {
    let without_commands = COMMAND_RE.replace_all(text, " ");
    let without_delimiters = DELIMITER_RE.replace_all(&without_commands, " ");
    collapse_whitespace(&without_delimiters)
}

/// Extracts every `\resumeItem{...}` argument in document order.
/// Items that are empty after whitespace normalization are dropped.
pub fn extract_items(document: &str) -> Vec<String> {
    RESUME_ITEM_RE
        .captures_iter(document)
        .filter_map(|caps| caps.get(1))
        .map(|m| collapse_whitespace(m.as_str()))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Number of whitespace-separated words left after stripping markup.
pub fn plain_word_count(document: &str) -> usize {
    strip_markup(document).split_whitespace().count()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}
