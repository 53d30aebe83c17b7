//! Tectonic-backed renderer.
//!
//! Per call: temp dir → write sanitized `resume.tex` → `tectonic resume.tex --outdir <dir>`
//! under a hard timeout → read `resume.pdf` → count pages. The `TempDir` guard and
//! `kill_on_drop` make cleanup unconditional, including on timeout.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::Config;
use crate::render::pdf::count_pdf_pages;
use crate::render::{DocumentRenderer, RenderError, RenderedDocument};

const SOURCE_FILE: &str = "resume.tex";
const OUTPUT_FILE: &str = "resume.pdf";
/// Renderer diagnostics are truncated to their last N characters.
const MAX_LOG_CHARS: usize = 2000;

/// pdfTeX-only directives that break XeTeX-based engines such as tectonic.
const PDFTEX_ONLY_DIRECTIVES: &[&str] = &[
    "\\input{glyphtounicode}",
    "\\pdfgentounicode=1",
    "\\pdfminorversion=7",
    "\\pdfobjcompresslevel=0",
];

#[derive(Debug, Clone)]
pub struct TectonicRenderer {
    program: String,
    timeout: Duration,
}

impl TectonicRenderer {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.renderer_program.clone(),
            Duration::from_secs(config.render_timeout_secs),
        )
    }
}

#[async_trait]
impl DocumentRenderer for TectonicRenderer {
    async fn render(&self, source: &str) -> Result<RenderedDocument, RenderError> {
        let workdir = tempfile::Builder::new().prefix("tailor-render-").tempdir()?;
        let tex_path = workdir.path().join(SOURCE_FILE);
        tokio::fs::write(&tex_path, sanitize_for_tectonic(source)).await?;

        let mut command = Command::new(&self.program);
        command
            .arg(&tex_path)
            .arg("--outdir")
            .arg(workdir.path())
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(RenderError::Spawn {
                    program: self.program.clone(),
                    source,
                })
            }
            Err(_) => {
                warn!(secs = self.timeout.as_secs(), "Renderer timed out; process killed");
                return Err(RenderError::Timeout {
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            let log = tail_chars(
                &format!(
                    "{}\n{}",
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr)
                ),
                MAX_LOG_CHARS,
            );
            return Err(RenderError::Failed {
                status: output.status.to_string(),
                log,
            });
        }

        let pdf = match tokio::fs::read(workdir.path().join(OUTPUT_FILE)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::MissingArtifact)
            }
            Err(e) => return Err(e.into()),
        };

        let page_count = count_pdf_pages(&pdf)?;
        debug!(page_count, pdf_bytes = pdf.len(), "Render succeeded");

        Ok(RenderedDocument {
            pdf: Bytes::from(pdf),
            page_count,
        })
    }
}

/// Removes directives the XeTeX engine rejects; everything else is untouched.
pub fn sanitize_for_tectonic(source: &str) -> String {
    PDFTEX_ONLY_DIRECTIVES
        .iter()
        .fold(source.to_string(), |acc, directive| acc.replace(directive, ""))
}

fn tail_chars(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    if count <= max {
        return trimmed.to_string();
    }
    trimmed.chars().skip(count - max).collect()
}
