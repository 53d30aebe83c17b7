//! Metrics Engine: heuristic quality scores for a tailored resume against a job description.
//!
//! Four independent sub-scores, each a pure function of the `\resumeItem` bullets
//! and/or the job text:
//! - `keyword_alignment`            0–100 %, exact phrase or fuzzy partial match
//! - `redundancy_level`             Low/Med/High from average pairwise token-set similarity
//! - `technical_specificity_level`  Low/Med/High from marker counts minus fluff
//! - `signal_density_score`         0–10, up to 4 points per bullet
//!
//! All marker checks are case-insensitive substring checks on the plain bullet text.

use serde::{Deserialize, Serialize};

use crate::analysis::keywords::{extract_keywords, DEFAULT_MAX_KEYWORDS};
use crate::analysis::normalize::{extract_items, strip_markup};
use crate::analysis::similarity::{partial_ratio, token_set_ratio};

const FUZZY_MATCH_THRESHOLD: f64 = 90.0;
const MAX_POINTS_PER_ITEM: usize = 4;

const TECH_MARKERS: &[&str] = &[
    "implemented", "designed", "built", "integrated", "debugged", "validated", "tested",
    "deployed", "docker", "linux", "kernel", "driver", "fastapi", "postgresql", "jwt", "oauth",
    "alembic", "openapi", "api", "rest", "ci", "cd", "pipeline", "cache", "rate", "limit",
    "schema", "migration", "auth", "memory", "mapped", "interrupt", "timer", "latency",
    "throughput", "gdb", "gcc", "clang",
];

const VALIDATION_MARKERS: &[&str] = &[
    "test", "tested", "testing", "validated", "verification", "benchmark", "unit",
    "integration", "regression", "coverage", "assert", "gtest", "pytest", "ci",
];

const SOFT_FLUFF: &[&str] = &[
    "collaborated",
    "cross-functional",
    "stakeholders",
    "communication",
    "team",
    "worked with",
];

/// Units, protocols and constraint words that count as quantification.
/// `axi` is the AMBA AXI bus.
const PRECISION_TERMS: &[&str] = &[
    "latency", "throughput", "ms", "hz", "kb", "mb", "gb", "%", "axi", "can", "ethernet",
    "tcp", "udp",
];

const ARCHITECTURE_TERMS: &[&str] = &[
    "schema",
    "migration",
    "driver",
    "kernel",
    "device",
    "api",
    "rate limit",
    "auth",
    "ownership",
    "memory-mapped",
    "interrupt",
    "pipeline",
];

/// Three-step ordinal used for redundancy and technical specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    Med,
    High,
}

/// Quality metrics for one candidate document. Computed once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// 0.0 – 10.0, one decimal.
    pub signal_density: f64,
    pub technical_specificity: Level,
    /// 0.0 – 100.0, one decimal.
    pub keyword_alignment: f64,
    pub redundancy: Level,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub bullet_count: usize,
    pub avg_bullet_length: f64,
    /// Diagnostic only; not part of best-candidate scoring.
    pub word_count: usize,
}

/// Scores `document` (LaTeX source) against `job_text`.
pub fn compute_metrics(document: &str, job_text: &str) -> Metrics {
    let items: Vec<String> = extract_items(document)
        .iter()
        .map(|item| strip_markup(item))
        .collect();
    let keywords = extract_keywords(job_text, DEFAULT_MAX_KEYWORDS);

    let plain = strip_markup(document);
    let word_count = plain.split_whitespace().count();

    let (keyword_alignment, matched_keywords, missing_keywords) =
        keyword_alignment(&plain, &keywords);

    let total_item_words: usize = items.iter().map(|i| i.split_whitespace().count()).sum();
    let avg_bullet_length = round1(total_item_words as f64 / items.len().max(1) as f64);

    Metrics {
        signal_density: signal_density_score(&items),
        technical_specificity: technical_specificity_level(&items),
        keyword_alignment,
        redundancy: redundancy_level(&items),
        matched_keywords,
        missing_keywords,
        bullet_count: items.len(),
        avg_bullet_length,
        word_count,
    }
}

/// Percentage of `keywords` found in `resume_text`, plus the matched and missing lists.
///
/// A multi-word keyword literally contained in the text matches outright; anything
/// else needs a partial-ratio similarity ≥ 90. Blank keywords are skipped but still
/// count toward the denominator, which is never below 1.
pub fn keyword_alignment(resume_text: &str, keywords: &[String]) -> (f64, Vec<String>, Vec<String>) {
    let resume = resume_text.to_lowercase();
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for keyword in keywords {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }

        let phrase_hit = needle.contains(' ') && resume.contains(&needle);
        if phrase_hit || partial_ratio(&needle, &resume) >= FUZZY_MATCH_THRESHOLD {
            matched.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }

    let total = keywords.len().max(1);
    let pct = matched.len() as f64 / total as f64 * 100.0;
    (round1(pct), matched, missing)
}

/// Average pairwise token-set similarity: ≥ 70 High, ≥ 55 Med, else Low.
pub fn redundancy_level(items: &[String]) -> Level {
    if items.len() < 2 {
        return Level::Low;
    }

    let mut total = 0.0_f64;
    let mut pairs = 0usize;
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            total += token_set_ratio(a, b);
            pairs += 1;
        }
    }

    let avg = total / pairs.max(1) as f64;
    if avg >= 70.0 {
        Level::High
    } else if avg >= 55.0 {
        Level::Med
    } else {
        Level::Low
    }
}

/// Average of (tech markers + validation markers − fluff markers) per item:
/// ≥ 2.0 High, ≥ 0.8 Med, else Low.
pub fn technical_specificity_level(items: &[String]) -> Level {
    if items.is_empty() {
        return Level::Low;
    }

    let total: i64 = items
        .iter()
        .map(|item| {
            let low = item.to_lowercase();
            count_present(&low, TECH_MARKERS) as i64 + count_present(&low, VALIDATION_MARKERS) as i64
                - count_present(&low, SOFT_FLUFF) as i64
        })
        .sum();

    let avg = total as f64 / items.len() as f64;
    if avg >= 2.0 {
        Level::High
    } else if avg >= 0.8 {
        Level::Med
    } else {
        Level::Low
    }
}

/// 0–10 score: each item earns one point each for a tech marker, a digit or
/// precision term, a validation marker and an architecture term.
pub fn signal_density_score(items: &[String]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    let total: usize = items
        .iter()
        .map(|item| {
            let low = item.to_lowercase();
            let points = [
                any_present(&low, TECH_MARKERS),
                low.chars().any(|c| c.is_ascii_digit()) || any_present(&low, PRECISION_TERMS),
                any_present(&low, VALIDATION_MARKERS),
                any_present(&low, ARCHITECTURE_TERMS),
            ]
            .into_iter()
            .filter(|hit| *hit)
            .count();
            points.min(MAX_POINTS_PER_ITEM)
        })
        .sum();

    let max_total = items.len() * MAX_POINTS_PER_ITEM;
    round1(total as f64 / max_total as f64 * 10.0)
}

fn count_present(text: &str, markers: &[&str]) -> usize {
    markers.iter().filter(|m| text.contains(*m)).count()
}

fn any_present(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
