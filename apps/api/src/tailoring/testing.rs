//! Scripted adapter fakes shared by orchestrator, page-fit and router tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::Config;
use crate::generation::{GenerationError, GenerationMode, ResumeGenerator};
use crate::render::{DocumentRenderer, RenderError, RenderedDocument};

/// Returns scripted documents in order and records every call.
/// An exhausted script fails like an empty backend response.
pub struct FakeGenerator {
    outputs: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, GenerationMode)>>,
    always_fail: bool,
}

impl FakeGenerator {
    pub fn new(outputs: Vec<String>) -> Self {
        Self {
            outputs: Mutex::new(outputs.into()),
            calls: Mutex::new(Vec::new()),
            always_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            always_fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn modes(&self) -> Vec<GenerationMode> {
        self.calls.lock().unwrap().iter().map(|(_, m)| *m).collect()
    }

    /// Source documents passed to each call, in order.
    pub fn inputs(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(d, _)| d.clone()).collect()
    }
}

#[async_trait]
impl ResumeGenerator for FakeGenerator {
    async fn generate(
        &self,
        document: &str,
        _job_text: &str,
        mode: GenerationMode,
    ) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push((document.to_string(), mode));
        if self.always_fail {
            return Err(GenerationError::EmptyOutput);
        }
        self.outputs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(GenerationError::EmptyOutput)
    }
}

/// Returns scripted page counts (or failures) in order and records every source.
/// An exhausted script fails with `MissingArtifact`.
pub struct FakeRenderer {
    results: Mutex<VecDeque<Result<usize, RenderError>>>,
    sources: Mutex<Vec<String>>,
}

impl FakeRenderer {
    pub fn pages(results: Vec<Result<usize, RenderError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            sources: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.sources.lock().unwrap().len()
    }

    pub fn sources(&self) -> Vec<String> {
        self.sources.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentRenderer for FakeRenderer {
    async fn render(&self, source: &str) -> Result<RenderedDocument, RenderError> {
        self.sources.lock().unwrap().push(source.to_string());
        let page_count = self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(RenderError::MissingArtifact))?;
        Ok(RenderedDocument {
            pdf: Bytes::from_static(b"%PDF-1.5\n%fake\n"),
            page_count,
        })
    }
}

/// A document of well over 600 plain words, distinguishable by `tag`.
pub fn long_document(tag: &str) -> String {
    let body: Vec<String> = (0..650).map(|i| format!("word{}", i % 50)).collect();
    format!(
        "\\documentclass{{article}}\n\\begin{{document}}\n{tag}\n{}\n\\end{{document}}\n",
        body.join(" ")
    )
}

/// A one-paragraph document far below the expansion word floor.
pub fn short_document(tag: &str) -> String {
    format!(
        "\\documentclass{{article}}\n\\begin{{document}}\n{tag} wrote a few services.\n\\end{{document}}\n"
    )
}

pub fn test_config() -> Config {
    Config {
        anthropic_api_key: "test-key".to_string(),
        llm_model: "test-model".to_string(),
        llm_timeout_secs: 5,
        renderer_program: "tectonic".to_string(),
        render_timeout_secs: 5,
        cors_allowed_origins: Vec::new(),
        port: 0,
        rust_log: "debug".to_string(),
    }
}
