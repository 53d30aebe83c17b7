//! Tailoring Orchestrator: runs up to two generate, page-fit and score passes and
//! picks the best candidate.
//!
//! Pass 1 (`default`) generates from the source document, enforces the page limit,
//! optionally expands an underfilled page, then scores. Pass 2
//! (`increase_technical_depth`) runs only when pass 1 misses a threshold and the
//! request allows it; it regenerates from the *original* source, not from pass 1's
//! output, and skips expansion.
//!
//! Steps inside one request are strictly sequential. Generation failures abort the
//! whole request; render failures inside the page-fit loop are recorded in the
//! decision trail and never raised.

use anyhow::Context;
use tracing::{debug, info};

use crate::analysis::{compute_metrics, Metrics};
use crate::errors::AppError;
use crate::generation::{GenerationMode, ResumeGenerator};
use crate::render::DocumentRenderer;
use crate::tailoring::models::{Decision, PassResult, TailoringRequest, TailoringResponse};
use crate::tailoring::page_fit::{
    enforce_page_limit, expand_if_underfilled, ExpansionOutcome, PAGE_LIMIT,
};
use crate::tailoring::selection::{candidate_score, select_best};

const SECOND_PASS_REASON: &str =
    "Below thresholds; regenerating with increase_technical_depth mode.";

/// Runs the full tailoring state machine for one request.
///
/// Returns either a complete response or a single error; never a partial result.
pub async fn tailor_resume(
    generator: &dyn ResumeGenerator,
    renderer: &dyn DocumentRenderer,
    request: &TailoringRequest,
) -> Result<TailoringResponse, AppError> {
    let mut decision = Decision::new(request.thresholds(), PAGE_LIMIT);
    let mut all_passes = Vec::with_capacity(2);

    info!(
        role_title = request.role_title.as_deref().unwrap_or("-"),
        company = request.company.as_deref().unwrap_or("-"),
        max_passes = request.max_passes,
        "Tailoring started"
    );

    // ── Pass 1 ──────────────────────────────────────────────────────────────
    let pass1 = run_pass(generator, renderer, request, 1, GenerationMode::Default, &mut decision)
        .await?;
    let pass1_metrics = pass1.metrics.clone();
    all_passes.push(pass1);

    // ── Pass 2 (conditional) ────────────────────────────────────────────────
    if needs_second_pass(&pass1_metrics, request) {
        info!(
            signal_density = pass1_metrics.signal_density,
            keyword_alignment = pass1_metrics.keyword_alignment,
            "Pass 1 below thresholds; running second pass"
        );
        decision.ran_second_pass = true;
        decision.add_reason(SECOND_PASS_REASON);

        let pass2 = run_pass(
            generator,
            renderer,
            request,
            2,
            GenerationMode::IncreaseTechnicalDepth,
            &mut decision,
        )
        .await?;
        all_passes.push(pass2);
    } else {
        debug!("Second pass not needed");
    }

    let best = select_best(&all_passes)
        .cloned()
        .context("no passes were produced")?;
    info!(
        best_pass = best.pass_index,
        score = candidate_score(&best.metrics),
        passes = all_passes.len(),
        "Tailoring finished"
    );

    Ok(TailoringResponse {
        best,
        all_passes,
        decision,
    })
}

/// True iff the request allows a second pass and pass 1 misses either threshold.
pub fn needs_second_pass(metrics: &Metrics, request: &TailoringRequest) -> bool {
    request.max_passes >= 2
        && (metrics.signal_density < request.min_signal_density
            || metrics.keyword_alignment < request.min_keyword_alignment)
}

/// One pass: generate from the original source, fit to the page limit, (pass 1 only)
/// expand, then score.
async fn run_pass(
    generator: &dyn ResumeGenerator,
    renderer: &dyn DocumentRenderer,
    request: &TailoringRequest,
    pass_index: u32,
    mode: GenerationMode,
    decision: &mut Decision,
) -> Result<PassResult, AppError> {
    let job_text = request.job_description.as_str();

    info!(pass_index, %mode, "Generating");
    let draft = generator
        .generate(&request.resume_latex, job_text, mode)
        .await?;

    let fit = enforce_page_limit(generator, renderer, draft, job_text, PAGE_LIMIT).await?;
    info!(
        pass_index,
        page_count = ?fit.page_count,
        render_attempts = fit.render_attempts,
        tighten_attempts = fit.tighten_attempts,
        validated = fit.candidate.validated,
        "Page fit settled"
    );

    if let Some(failure) = &fit.render_failure {
        if pass_index == 1 {
            decision.add_reason(failure.as_str());
        } else {
            decision.add_reason(format!("Pass {pass_index}: {failure}"));
        }
    }

    let mut candidate = fit.candidate;
    if pass_index == 1 {
        decision.page_count = fit.page_count;
        decision.tighten_attempts = fit.tighten_attempts;

        match expand_if_underfilled(
            generator,
            renderer,
            &candidate,
            fit.page_count,
            job_text,
            PAGE_LIMIT,
        )
        .await?
        {
            ExpansionOutcome::NotNeeded => {}
            ExpansionOutcome::Accepted(expanded) => {
                info!(pass_index, "Expansion accepted");
                decision.expanded_to_fill = Some(true);
                candidate = expanded;
            }
            ExpansionOutcome::Rejected { reason } => {
                info!(pass_index, %reason, "Expansion discarded");
                decision.expanded_to_fill = Some(false);
            }
        }
    }

    let metrics = score_candidate(&candidate.source, job_text).await?;
    info!(
        pass_index,
        signal_density = metrics.signal_density,
        keyword_alignment = metrics.keyword_alignment,
        redundancy = ?metrics.redundancy,
        "Pass scored"
    );

    Ok(PassResult {
        pass_index,
        mode,
        tailored_resume_latex: candidate.source,
        metrics,
    })
}

async fn score_candidate(document: &str, job_text: &str) -> Result<Metrics, AppError> {
    let document = document.to_owned();
    let job_text = job_text.to_owned();
    let metrics = tokio::task::spawn_blocking(move || compute_metrics(&document, &job_text))
        .await
        .context("metrics task panicked")?;
    Ok(metrics)
}
