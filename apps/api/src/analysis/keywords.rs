//! Keyword Extractor: ranked, deduplicated salient terms from a job description.
//!
//! Priority order of the output pool:
//! 1. known multi-word / domain phrases found verbatim in the text
//! 2. boosted domain terms present in the tokens or the raw text
//! 3. every other cleaned token, in first-seen order
//!
//! The order decides which terms survive truncation to `max_keywords`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_MAX_KEYWORDS: usize = 30;

const MIN_TOKEN_LEN: usize = 3;
/// URLs and pasted blobs are not keywords.
const MAX_TOKEN_LEN: usize = 64;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z][a-zA-Z0-9+#/.\-]+").expect("valid regex"));

const STOPWORDS: &[&str] = &[
    "and", "or", "the", "a", "an", "to", "of", "in", "for", "with", "on", "as", "at", "by",
    "from", "be", "is", "are", "was", "were", "this", "that", "it", "their", "our", "you",
    "your", "we", "will", "work", "within", "more", "use", "using", "including", "etc", "plus",
];

/// Phrases detected by plain substring search on the lowercased text.
const PHRASES: &[&str] = &[
    "embedded linux",
    "device drivers",
    "real-time",
    "real time",
    "memory mapped",
    "rest api",
    "openapi",
    "unit test",
    "integration test",
    "continuous integration",
    "agile",
    "sprint",
    "jwt",
    "oauth",
    "git",
    "github",
    "docker",
    "postgresql",
    "c test",
    "g test",
    "gtest",
    "python",
    "c++",
    "linux",
];

/// Domain terms always promoted ahead of generic tokens when present.
const BOOST_TERMS: &[&str] = &[
    "fastapi",
    "postgresql",
    "docker",
    "linux",
    "git",
    "github",
    "jwt",
    "oauth",
    "rest",
    "api",
    "typescript",
    "react",
    "tauri",
    "rust",
    "ci/cd",
    "kubernetes",
    "grpc",
    "redis",
    "alembic",
    "openapi",
    "swagger",
    "pytest",
    "gtest",
    "c++",
    "c",
    "python",
    "sql",
    "firebase",
];

/// Lowercases and maps symbol-suffixed spellings onto canonical ones (`c++` → `cpp`).
pub fn normalize_token(token: &str) -> String {
    token
        .trim()
        .to_lowercase()
        .replace("c++", "cpp")
        .replace("c#", "csharp")
}

/// Extracts at most `max_keywords` unique keywords, highest priority first.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    let lowered = text.to_lowercase();

    let phrases = PHRASES
        .iter()
        .filter(|phrase| lowered.contains(*phrase))
        .map(|phrase| normalize_token(phrase));

    let cleaned: Vec<String> = TOKEN_RE
        .find_iter(&lowered)
        .map(|m| normalize_token(m.as_str()))
        .filter(|token| {
            (MIN_TOKEN_LEN..=MAX_TOKEN_LEN).contains(&token.chars().count())
                && !STOPWORDS.contains(&token.as_str())
        })
        .collect();
    let cleaned_set: HashSet<&str> = cleaned.iter().map(String::as_str).collect();
    let words: HashSet<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|w| !w.is_empty())
        .collect();

    // Short boosted terms ("c") must appear as a whole word; longer ones may match anywhere.
    let boosted = BOOST_TERMS
        .iter()
        .map(|term| normalize_token(term))
        .filter(|term| {
            if term.len() < MIN_TOKEN_LEN {
                words.contains(term.as_str())
            } else {
                cleaned_set.contains(term.as_str()) || lowered.contains(term.as_str())
            }
        });

    let mut seen = HashSet::new();
    phrases
        .chain(boosted)
        .chain(cleaned.iter().cloned())
        .filter(|keyword| seen.insert(keyword.clone()))
        .take(max_keywords)
        .collect()
}
