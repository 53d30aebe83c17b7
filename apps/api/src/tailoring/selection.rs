//! Best-candidate selection across passes.

use crate::analysis::{Level, Metrics};
use crate::tailoring::models::PassResult;

const KEYWORD_ALIGNMENT_WEIGHT: f64 = 0.65;
const SIGNAL_DENSITY_WEIGHT: f64 = 3.5;
const HIGH_REDUNDANCY_PENALTY: f64 = 0.8;
const MED_REDUNDANCY_PENALTY: f64 = 0.3;

/// `keyword_alignment·0.65 + signal_density·3.5 − redundancy penalty`.
pub fn candidate_score(metrics: &Metrics) -> f64 {
    let penalty = match metrics.redundancy {
        Level::High => HIGH_REDUNDANCY_PENALTY,
        Level::Med => MED_REDUNDANCY_PENALTY,
        Level::Low => 0.0,
    };
    metrics.keyword_alignment * KEYWORD_ALIGNMENT_WEIGHT
        + metrics.signal_density * SIGNAL_DENSITY_WEIGHT
        - penalty
}

/// Highest-scoring pass. Ties go to the earliest pass.
pub fn select_best(passes: &[PassResult]) -> Option<&PassResult> {
    passes.iter().fold(None, |best: Option<&PassResult>, pass| match best {
        Some(current) if candidate_score(&pass.metrics) <= candidate_score(&current.metrics) => {
            Some(current)
        }
        _ => Some(pass),
    })
}
