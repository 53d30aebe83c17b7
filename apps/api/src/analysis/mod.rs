// Resume analysis: markup normalization, JD keyword extraction, fuzzy similarity
// and the heuristic metrics used to compare tailoring passes.
// Everything here is pure and synchronous; async callers wrap it in spawn_blocking.

pub mod keywords;
pub mod metrics;
pub mod normalize;
pub mod similarity;

pub use metrics::{compute_metrics, Level, Metrics};
