mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod sources;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{HttpChatBackend, LlmClient};
use crate::models::PersonalInfo;
use crate::render::{LatexCompiler, Templates};
use crate::routes::build_router;
use crate::sources::PageFetcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    let personal = PersonalInfo::load(&config.personal_info_path)?;
    info!("Personal info loaded for {}", personal.name);

    let templates = match &config.templates_dir {
        Some(dir) => {
            info!("Loading templates from {}", dir.display());
            Templates::load_dir(dir)?
        }
        None => Templates::builtin().context("Built-in templates failed to parse")?,
    };

    // Initialize LLM client
    let backend = HttpChatBackend::new(
        config.groq_api_key.clone(),
        config.llm_api_url.clone(),
        config.llm_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )
    .context("Failed to build LLM HTTP client")?;
    let llm = LlmClient::new(Arc::new(backend));
    info!("LLM client initialized (model: {})", config.llm_model);

    let fetcher = PageFetcher::new(Duration::from_secs(config.fetch_timeout_secs))
        .context("Failed to build job page HTTP client")?;

    let compiler = LatexCompiler::new(
        config.latex_bin.clone(),
        LatexCompiler::pdflatex_args(),
        config.latex_passes,
        Duration::from_secs(config.latex_timeout_secs),
        config.work_dir.clone(),
    );
    info!(
        "LaTeX compiler: {} ({} passes, {}s timeout) in {}",
        config.latex_bin,
        config.latex_passes,
        config.latex_timeout_secs,
        config.work_dir.display()
    );

    // Build app state
    let state = AppState {
        llm,
        fetcher,
        templates: Arc::new(templates),
        personal: Arc::new(personal),
        compiler: Arc::new(compiler),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
