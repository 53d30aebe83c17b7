//! Document Renderer Adapter: LaTeX source → PDF bytes + page count.
//!
//! Each call runs the external renderer in its own temporary directory, removed on
//! every exit path (success, failure, timeout). No retries at this layer: the
//! tailoring loop decides what a failed render means.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub mod handlers;
pub mod pdf;
pub mod tectonic;

pub use tectonic::TectonicRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to launch renderer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("renderer I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("renderer timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("renderer exited with status {status}: {log}")]
    Failed { status: String, log: String },

    #[error("renderer finished but produced no PDF")]
    MissingArtifact,

    #[error("rendered PDF could not be parsed: {0}")]
    InvalidPdf(#[from] lopdf::Error),
}

/// A successfully rendered document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub pdf: Bytes,
    pub page_count: usize,
}

#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, source: &str) -> Result<RenderedDocument, RenderError>;

    /// Renders and keeps only the page count.
    async fn render_and_count(&self, source: &str) -> Result<usize, RenderError> {
        Ok(self.render(source).await?.page_count)
    }
}
