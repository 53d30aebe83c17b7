mod analysis;
mod config;
mod errors;
mod generation;
mod llm_client;
mod render;
mod routes;
mod state;
mod tailoring;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::LlmResumeGenerator;
use crate::llm_client::LlmClient;
use crate::render::TectonicRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM-backed generator
    let llm = LlmClient::new(&config).context("failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm.model());
    let generator = Arc::new(LlmResumeGenerator::new(llm));

    // Initialize renderer
    let renderer = Arc::new(TectonicRenderer::from_config(&config));
    info!(
        "Renderer: {} (timeout {}s)",
        config.renderer_program, config.render_timeout_secs
    );

    let cors = build_cors(&config.cors_allowed_origins)?;

    let state = AppState {
        config: config.clone(),
        generator,
        renderer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Allowlist when origins are configured, permissive otherwise.
fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        info!("CORS: no origins configured, allowing any origin");
        return Ok(CorsLayer::permissive());
    }

    let allowed = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    info!("CORS: allowing {} origin(s)", allowed.len());

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any))
}
