//! Request, response and audit types for one tailoring request.
//!
//! Everything here lives for exactly one request: nothing is cached or shared.

use serde::{Deserialize, Serialize};

use crate::analysis::Metrics;
use crate::errors::AppError;
use crate::generation::GenerationMode;

pub const DEFAULT_MIN_SIGNAL_DENSITY: f64 = 7.6;
pub const DEFAULT_MIN_KEYWORD_ALIGNMENT: f64 = 82.0;
pub const DEFAULT_MAX_PASSES: u32 = 2;
pub const MAX_PASSES_LIMIT: u32 = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// Immutable input of one tailoring run.
#[derive(Debug, Clone, Deserialize)]
pub struct TailoringRequest {
    pub resume_latex: String,
    pub job_description: String,
    pub role_title: Option<String>,
    pub company: Option<String>,
    /// 0.0 – 10.0
    #[serde(default = "default_min_signal_density")]
    pub min_signal_density: f64,
    /// 0.0 – 100.0
    #[serde(default = "default_min_keyword_alignment")]
    pub min_keyword_alignment: f64,
    /// 1 – 3
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,
}

fn default_min_signal_density() -> f64 {
    DEFAULT_MIN_SIGNAL_DENSITY
}

fn default_min_keyword_alignment() -> f64 {
    DEFAULT_MIN_KEYWORD_ALIGNMENT
}

fn default_max_passes() -> u32 {
    DEFAULT_MAX_PASSES
}

impl TailoringRequest {
    /// Rejects malformed fields before any generation work begins.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.resume_latex.trim().is_empty() {
            return Err(AppError::Validation(
                "resume_latex cannot be empty".to_string(),
            ));
        }
        if self.job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "job_description cannot be empty".to_string(),
            ));
        }
        if !(0.0..=10.0).contains(&self.min_signal_density) {
            return Err(AppError::Validation(format!(
                "min_signal_density must be between 0.0 and 10.0, got {}",
                self.min_signal_density
            )));
        }
        if !(0.0..=100.0).contains(&self.min_keyword_alignment) {
            return Err(AppError::Validation(format!(
                "min_keyword_alignment must be between 0.0 and 100.0, got {}",
                self.min_keyword_alignment
            )));
        }
        if !(1..=MAX_PASSES_LIMIT).contains(&self.max_passes) {
            return Err(AppError::Validation(format!(
                "max_passes must be between 1 and {MAX_PASSES_LIMIT}, got {}",
                self.max_passes
            )));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            min_signal_density: self.min_signal_density,
            min_keyword_alignment: self.min_keyword_alignment,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_signal_density: f64,
    pub min_keyword_alignment: f64,
}

/// Outcome of one generation pass. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassResult {
    pub pass_index: u32,
    pub mode: GenerationMode,
    pub tailored_resume_latex: String,
    pub metrics: Metrics,
}

/// Audit trail of the decisions taken while serving one request.
///
/// `page_count` and `tighten_attempts` describe pass 1. `expanded_to_fill` is
/// absent when no expansion was attempted, `false` when one was discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub ran_second_pass: bool,
    pub reason: Option<String>,
    pub thresholds: Thresholds,
    pub page_limit: usize,
    pub page_count: Option<usize>,
    pub tighten_attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_to_fill: Option<bool>,
}

impl Decision {
    pub fn new(thresholds: Thresholds, page_limit: usize) -> Self {
        Self {
            ran_second_pass: false,
            reason: None,
            thresholds,
            page_limit,
            page_count: None,
            tighten_attempts: 0,
            expanded_to_fill: None,
        }
    }

    /// Appends to the reason trail; earlier entries are kept.
    pub fn add_reason(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        self.reason = Some(match self.reason.take() {
            Some(existing) => format!("{existing} | {reason}"),
            None => reason,
        });
    }
}

/// Terminal output of a tailoring run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoringResponse {
    pub best: PassResult,
    pub all_passes: Vec<PassResult>,
    pub decision: Decision,
}
