use std::sync::Arc;

use crate::config::Config;
use crate::generation::ResumeGenerator;
use crate::render::DocumentRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data: every tailoring request builds its own decision trail.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Default: `LlmResumeGenerator`. Swapped for scripted fakes in tests.
    pub generator: Arc<dyn ResumeGenerator>,
    /// Default: `TectonicRenderer`.
    pub renderer: Arc<dyn DocumentRenderer>,
}
