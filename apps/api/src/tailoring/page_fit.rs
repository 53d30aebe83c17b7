//! One-page enforcement: the render, measure and tighten loop plus the single
//! expansion step.
//!
//! # Candidate state
//! Every document the loop holds is a `Candidate { source, validated }`. Only a
//! candidate that rendered successfully is `validated`, and only validated
//! candidates become `last_good`. A render failure reverts to `last_good` (if any)
//! and stops the loop; the failure is reported, never raised.
//!
//! # Bounds
//! At most `MAX_TIGHTEN_ATTEMPTS + 1` renders per loop. A tighten rewrite is only
//! requested when another render is still allowed, so the loop never ends holding
//! an unrendered rewrite.

use tracing::{debug, info, warn};

use crate::analysis::normalize::plain_word_count;
use crate::generation::{GenerationError, GenerationMode, ResumeGenerator};
use crate::render::DocumentRenderer;

pub const PAGE_LIMIT: usize = 1;
/// Tighten rewrites after the initial render (3 renders total).
pub const MAX_TIGHTEN_ATTEMPTS: u32 = 2;
/// A one-page candidate with fewer plain words than this is considered underfilled.
pub const EXPAND_WORD_FLOOR: usize = 600;
const MAX_REASON_DETAIL_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub source: String,
    /// True once this exact source rendered successfully.
    pub validated: bool,
}

impl Candidate {
    pub fn unvalidated(source: String) -> Self {
        Self {
            source,
            validated: false,
        }
    }
}

/// Where the tighten loop settled.
#[derive(Debug, Clone)]
pub struct PageFitOutcome {
    /// Last good candidate, or the unvalidated initial draft if nothing ever rendered.
    pub candidate: Candidate,
    /// Page count of `candidate`; `None` when it never rendered.
    pub page_count: Option<usize>,
    pub render_attempts: u32,
    pub tighten_attempts: u32,
    /// Set when a render failure stopped the loop early.
    pub render_failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionOutcome {
    /// Not on exactly one page, or already at or above the word floor.
    NotNeeded,
    /// Expanded rewrite rendered to exactly the page limit.
    Accepted(Candidate),
    /// Expanded rewrite overflowed or failed to render; it was discarded.
    Rejected { reason: String },
}

/// Renders `initial` and tightens it until it fits `page_limit` or the attempts run out.
///
/// Generation failures propagate; render failures are absorbed into the outcome.
pub async fn enforce_page_limit(
    generator: &dyn ResumeGenerator,
    renderer: &dyn DocumentRenderer,
    initial: String,
    job_text: &str,
    page_limit: usize,
) -> Result<PageFitOutcome, GenerationError> {
    let mut current = Candidate::unvalidated(initial);
    let mut last_good: Option<Candidate> = None;
    let mut page_count = None;
    let mut render_attempts = 0u32;
    let mut tighten_attempts = 0u32;
    let mut render_failure = None;

    for attempt in 0..=MAX_TIGHTEN_ATTEMPTS {
        render_attempts += 1;

        let pages = match renderer.render_and_count(&current.source).await {
            Ok(pages) => pages,
            Err(e) => {
                warn!(attempt, error = %e, "Render failed; reverting to last good candidate");
                render_failure = Some(format!(
                    "Compile failed during tighten attempt {attempt}: {}",
                    truncate_chars(&e.to_string(), MAX_REASON_DETAIL_CHARS)
                ));
                if let Some(good) = last_good.take() {
                    current = good;
                }
                break;
            }
        };

        current.validated = true;
        last_good = Some(current.clone());
        page_count = Some(pages);
        debug!(attempt, pages, page_limit, "Render succeeded");

        if pages <= page_limit {
            break;
        }
        if attempt == MAX_TIGHTEN_ATTEMPTS {
            warn!(
                pages,
                page_limit, "Still over the page limit after all tighten attempts"
            );
            break;
        }

        tighten_attempts = attempt + 1;
        info!(pages, tighten_attempt = tighten_attempts, "Over page limit; tightening");
        let tightened = generator
            .generate(&current.source, job_text, GenerationMode::TightenToOnePage)
            .await?;
        current = Candidate::unvalidated(tightened);
    }

    Ok(PageFitOutcome {
        candidate: current,
        page_count,
        render_attempts,
        tighten_attempts,
        render_failure,
    })
}

/// Runs at most one expansion rewrite when a one-page candidate is underfilled.
///
/// The rewrite is kept only if it still renders to exactly `page_limit` pages.
pub async fn expand_if_underfilled(
    generator: &dyn ResumeGenerator,
    renderer: &dyn DocumentRenderer,
    candidate: &Candidate,
    page_count: Option<usize>,
    job_text: &str,
    page_limit: usize,
) -> Result<ExpansionOutcome, GenerationError> {
    if page_count != Some(page_limit) {
        return Ok(ExpansionOutcome::NotNeeded);
    }

    let word_count = plain_word_count(&candidate.source);
    if word_count >= EXPAND_WORD_FLOOR {
        return Ok(ExpansionOutcome::NotNeeded);
    }

    info!(word_count, floor = EXPAND_WORD_FLOOR, "Underfilled page; expanding");
    let expanded = generator
        .generate(&candidate.source, job_text, GenerationMode::ExpandToFillOnePage)
        .await?;

    let outcome = match renderer.render_and_count(&expanded).await {
        Ok(pages) if pages == page_limit => ExpansionOutcome::Accepted(Candidate {
            source: expanded,
            validated: true,
        }),
        Ok(pages) => ExpansionOutcome::Rejected {
            reason: format!("expanded candidate rendered to {pages} pages"),
        },
        Err(e) => ExpansionOutcome::Rejected {
            reason: format!(
                "expanded candidate failed to compile: {}",
                truncate_chars(&e.to_string(), MAX_REASON_DETAIL_CHARS)
            ),
        },
    };
    Ok(outcome)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderError;
    use crate::tailoring::testing::{long_document, short_document, FakeGenerator, FakeRenderer};

    const JD: &str = "Rust engineer";

    #[tokio::test]
    async fn test_fits_first_time_renders_once() {
        let generator = FakeGenerator::new(vec![]);
        let renderer = FakeRenderer::pages(vec![Ok(1)]);

        let outcome = enforce_page_limit(&generator, &renderer, "draft".into(), JD, PAGE_LIMIT)
            .await
            .unwrap();

        assert_eq!(outcome.candidate, Candidate { source: "draft".into(), validated: true });
        assert_eq!(outcome.page_count, Some(1));
        assert_eq!(outcome.render_attempts, 1);
        assert_eq!(outcome.tighten_attempts, 0);
        assert!(outcome.render_failure.is_none());
        assert!(generator.modes().is_empty());
    }

    #[tokio::test]
    async fn test_overflow_tightens_until_it_fits() {
        let generator = FakeGenerator::new(vec!["tight-1".into()]);
        let renderer = FakeRenderer::pages(vec![Ok(2), Ok(1)]);

        let outcome = enforce_page_limit(&generator, &renderer, "draft".into(), JD, PAGE_LIMIT)
            .await
            .unwrap();

        assert_eq!(outcome.candidate.source, "tight-1");
        assert!(outcome.candidate.validated);
        assert_eq!(outcome.page_count, Some(1));
        assert_eq!(outcome.tighten_attempts, 1);
        assert_eq!(generator.modes(), vec![GenerationMode::TightenToOnePage]);
        // The tighten rewrite is fed the overflowing candidate.
        assert_eq!(generator.inputs(), vec!["draft".to_string()]);
        assert_eq!(renderer.sources(), vec!["draft".to_string(), "tight-1".to_string()]);
    }

    #[tokio::test]
    async fn test_never_more_than_three_renders() {
        let generator = FakeGenerator::new(vec!["tight-1".into(), "tight-2".into()]);
        let renderer = FakeRenderer::pages(vec![Ok(3), Ok(2), Ok(2)]);

        let outcome = enforce_page_limit(&generator, &renderer, "draft".into(), JD, PAGE_LIMIT)
            .await
            .unwrap();

        assert_eq!(renderer.call_count(), 3);
        assert_eq!(outcome.render_attempts, 3);
        assert_eq!(outcome.tighten_attempts, 2);
        // No third rewrite is requested once no render is left to check it.
        assert_eq!(generator.modes().len(), 2);
        assert_eq!(outcome.candidate, Candidate { source: "tight-2".into(), validated: true });
        assert_eq!(outcome.page_count, Some(2));
    }

    #[tokio::test]
    async fn test_first_render_failure_keeps_draft_unchanged() {
        let generator = FakeGenerator::new(vec![]);
        let renderer = FakeRenderer::pages(vec![Err(RenderError::MissingArtifact)]);

        let outcome = enforce_page_limit(&generator, &renderer, "draft".into(), JD, PAGE_LIMIT)
            .await
            .unwrap();

        assert_eq!(outcome.candidate, Candidate::unvalidated("draft".into()));
        assert_eq!(outcome.page_count, None);
        assert_eq!(outcome.render_attempts, 1);
        let reason = outcome.render_failure.unwrap();
        assert!(reason.starts_with("Compile failed during tighten attempt 0"), "{reason}");
        assert!(generator.modes().is_empty());
    }

    #[tokio::test]
    async fn test_failed_tighten_render_reverts_to_last_good() {
        let generator = FakeGenerator::new(vec!["broken".into()]);
        let renderer = FakeRenderer::pages(vec![
            Ok(2),
            Err(RenderError::Failed {
                status: "exit status: 1".into(),
                log: "! Missing } inserted.".into(),
            }),
        ]);

        let outcome = enforce_page_limit(&generator, &renderer, "draft".into(), JD, PAGE_LIMIT)
            .await
            .unwrap();

        assert_eq!(outcome.candidate, Candidate { source: "draft".into(), validated: true });
        assert_eq!(outcome.page_count, Some(2));
        assert_eq!(outcome.tighten_attempts, 1);
        let reason = outcome.render_failure.unwrap();
        assert!(reason.contains("tighten attempt 1"), "{reason}");
        assert!(reason.contains("Missing } inserted"), "{reason}");
    }

    #[tokio::test]
    async fn test_failure_reason_is_truncated() {
        let generator = FakeGenerator::new(vec![]);
        let renderer = FakeRenderer::pages(vec![Err(RenderError::Failed {
            status: "exit status: 1".into(),
            log: "x".repeat(5000),
        })]);

        let outcome = enforce_page_limit(&generator, &renderer, "draft".into(), JD, PAGE_LIMIT)
            .await
            .unwrap();

        let reason = outcome.render_failure.unwrap();
        assert!(reason.chars().count() < 300, "reason too long: {}", reason.len());
    }

    #[tokio::test]
    async fn test_tighten_generation_failure_propagates() {
        let generator = FakeGenerator::failing();
        let renderer = FakeRenderer::pages(vec![Ok(2)]);

        let result =
            enforce_page_limit(&generator, &renderer, "draft".into(), JD, PAGE_LIMIT).await;
        assert!(result.is_err());
    }

    // ── expansion ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_expansion_skipped_when_not_one_page() {
        let generator = FakeGenerator::new(vec![]);
        let renderer = FakeRenderer::pages(vec![]);
        let candidate = Candidate::unvalidated(short_document("s"));

        for pages in [None, Some(2)] {
            let outcome =
                expand_if_underfilled(&generator, &renderer, &candidate, pages, JD, PAGE_LIMIT)
                    .await
                    .unwrap();
            assert_eq!(outcome, ExpansionOutcome::NotNeeded);
        }
        assert!(generator.modes().is_empty());
    }

    #[tokio::test]
    async fn test_expansion_skipped_at_word_floor() {
        let generator = FakeGenerator::new(vec![]);
        let renderer = FakeRenderer::pages(vec![]);
        let candidate = Candidate::unvalidated(long_document("l"));
        assert!(plain_word_count(&candidate.source) >= EXPAND_WORD_FLOOR);

        let outcome =
            expand_if_underfilled(&generator, &renderer, &candidate, Some(1), JD, PAGE_LIMIT)
                .await
                .unwrap();
        assert_eq!(outcome, ExpansionOutcome::NotNeeded);
    }

    #[tokio::test]
    async fn test_expansion_accepted_on_one_page() {
        let generator = FakeGenerator::new(vec!["expanded".into()]);
        let renderer = FakeRenderer::pages(vec![Ok(1)]);
        let candidate = Candidate::unvalidated(short_document("s"));

        let outcome =
            expand_if_underfilled(&generator, &renderer, &candidate, Some(1), JD, PAGE_LIMIT)
                .await
                .unwrap();

        assert_eq!(
            outcome,
            ExpansionOutcome::Accepted(Candidate { source: "expanded".into(), validated: true })
        );
        assert_eq!(generator.modes(), vec![GenerationMode::ExpandToFillOnePage]);
    }

    #[tokio::test]
    async fn test_expansion_rejected_on_overflow_or_failure() {
        let candidate = Candidate::unvalidated(short_document("s"));

        let generator = FakeGenerator::new(vec!["expanded".into()]);
        let renderer = FakeRenderer::pages(vec![Ok(2)]);
        let outcome =
            expand_if_underfilled(&generator, &renderer, &candidate, Some(1), JD, PAGE_LIMIT)
                .await
                .unwrap();
        assert!(matches!(outcome, ExpansionOutcome::Rejected { ref reason } if reason.contains("2 pages")));

        let generator = FakeGenerator::new(vec!["expanded".into()]);
        let renderer = FakeRenderer::pages(vec![Err(RenderError::Timeout { secs: 30 })]);
        let outcome =
            expand_if_underfilled(&generator, &renderer, &candidate, Some(1), JD, PAGE_LIMIT)
                .await
                .unwrap();
        assert!(matches!(outcome, ExpansionOutcome::Rejected { ref reason } if reason.contains("timed out")));
    }
}
