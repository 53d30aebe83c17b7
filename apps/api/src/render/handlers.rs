//! Axum route handler for the Compile API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

/// Anything shorter cannot be a full resume document.
const MIN_LATEX_CHARS: usize = 200;

pub const PAGE_COUNT_HEADER: HeaderName = HeaderName::from_static("x-pdf-pages");

#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    #[serde(default)]
    pub latex: String,
}

/// POST /api/v1/compile
///
/// Renders LaTeX to PDF and streams the bytes back, with the page count in `X-PDF-Pages`.
pub async fn handle_compile(
    State(state): State<AppState>,
    payload: Result<Json<CompileRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    if request.latex.chars().count() < MIN_LATEX_CHARS {
        return Err(AppError::Validation("Missing LaTeX content.".to_string()));
    }

    let rendered = state.renderer.render(&request.latex).await?;
    info!(page_count = rendered.page_count, "Compiled LaTeX to PDF");

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"resume.pdf\"".to_string(),
        ),
        (header::CACHE_CONTROL, "no-store".to_string()),
        (PAGE_COUNT_HEADER, rendered.page_count.to_string()),
    ];

    Ok((headers, rendered.pdf).into_response())
}
