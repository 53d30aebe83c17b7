//! Axum route handler for the Tailoring API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tailoring::models::{TailoringRequest, TailoringResponse};
use crate::tailoring::orchestrator::tailor_resume;

/// POST /api/v1/tailor
///
/// Runs the tailoring passes and returns the best candidate with the full audit trail.
/// Malformed bodies and out-of-range fields are rejected before any generation call.
pub async fn handle_tailor(
    State(state): State<AppState>,
    payload: Result<Json<TailoringRequest>, JsonRejection>,
) -> Result<Json<TailoringResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    request.validate()?;

    let span = info_span!("tailor", request_id = %Uuid::new_v4());
    let response = tailor_resume(state.generator.as_ref(), state.renderer.as_ref(), &request)
        .instrument(span)
        .await?;

    Ok(Json(response))
}
