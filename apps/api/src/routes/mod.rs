pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::render::handlers::handle_compile;
use crate::state::AppState;
use crate::tailoring::handlers::handle_tailor;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Tailoring API
        .route("/api/v1/tailor", post(handle_tailor))
        // Compile API
        .route("/api/v1/compile", post(handle_compile))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::render::handlers::PAGE_COUNT_HEADER;
    use crate::tailoring::testing::{long_document, test_config, FakeGenerator, FakeRenderer};

    fn app(generator: FakeGenerator, renderer: FakeRenderer) -> Router {
        build_router(AppState {
            config: test_config(),
            generator: Arc::new(generator),
            renderer: Arc::new(renderer),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let response = app(FakeGenerator::new(vec![]), FakeRenderer::pages(vec![]))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_tailor_rejects_out_of_range_passes() {
        let generator = FakeGenerator::new(vec![]);
        let response = app(generator, FakeRenderer::pages(vec![]))
            .oneshot(post_json(
                "/api/v1/tailor",
                json!({
                    "resume_latex": long_document("src"),
                    "job_description": "Rust engineer",
                    "max_passes": 4
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_tailor_rejects_malformed_json() {
        let response = app(FakeGenerator::new(vec![]), FakeRenderer::pages(vec![]))
            .oneshot(post_json("/api/v1/tailor", json!({"job_description": 7})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tailor_returns_full_response() {
        let generator = FakeGenerator::new(vec![long_document("pass-1")]);
        let response = app(generator, FakeRenderer::pages(vec![Ok(1)]))
            .oneshot(post_json(
                "/api/v1/tailor",
                json!({
                    "resume_latex": long_document("src"),
                    "job_description": "Rust engineer with Docker",
                    "min_signal_density": 0.0,
                    "min_keyword_alignment": 0.0
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["best"]["pass_index"], 1);
        assert_eq!(body["best"]["mode"], "default");
        assert_eq!(body["all_passes"].as_array().unwrap().len(), 1);
        assert_eq!(body["decision"]["page_limit"], 1);
        assert_eq!(body["decision"]["page_count"], 1);
        assert_eq!(body["decision"]["ran_second_pass"], false);
        assert!(body["decision"]["reason"].is_null());
        assert!(body["decision"].get("expanded_to_fill").is_none());
    }

    #[tokio::test]
    async fn test_tailor_generation_failure_is_single_error() {
        let generator = FakeGenerator::failing();
        let response = app(generator, FakeRenderer::pages(vec![]))
            .oneshot(post_json(
                "/api/v1/tailor",
                json!({
                    "resume_latex": long_document("src"),
                    "job_description": "Rust engineer"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "GENERATION_ERROR");
        assert!(body.get("best").is_none());
    }

    #[tokio::test]
    async fn test_compile_rejects_short_source() {
        let response = app(FakeGenerator::new(vec![]), FakeRenderer::pages(vec![]))
            .oneshot(post_json("/api/v1/compile", json!({"latex": "\\documentclass{article}"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compile_returns_pdf_with_page_header() {
        let response = app(FakeGenerator::new(vec![]), FakeRenderer::pages(vec![Ok(2)]))
            .oneshot(post_json("/api/v1/compile", json!({"latex": long_document("cv")})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/pdf");
        assert_eq!(response.headers()[PAGE_COUNT_HEADER], "2");
    }

    #[tokio::test]
    async fn test_compile_render_failure_is_render_error() {
        let renderer = FakeRenderer::pages(vec![Err(crate::render::RenderError::MissingArtifact)]);
        let response = app(FakeGenerator::new(vec![]), renderer)
            .oneshot(post_json("/api/v1/compile", json!({"latex": long_document("cv")})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "RENDER_ERROR");
    }
}
