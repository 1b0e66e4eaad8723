mod config;
mod errors;
mod extract;
mod llm_client;
mod models;
mod parsing;
mod routes;
mod state;
mod store;
mod subdomain;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{AnthropicClient, OpenAiClient};
use crate::parsing::parser::LlmResumeParser;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::MemStorage;

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

    info!("Starting VibeCodes API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM providers: OpenAI primary, Anthropic fallback
    let primary = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    let secondary = Arc::new(AnthropicClient::new(config.anthropic_api_key.clone()));
    let parser = LlmResumeParser::new(primary, secondary);
    info!(
        "LLM clients initialized (primary: {}, secondary: {}, prompts: {})",
        llm_client::OPENAI_MODEL,
        llm_client::ANTHROPIC_MODEL,
        llm_client::prompts::RESUME_PROMPT_VERSION
    );

    // Initialize the in-memory record store
    let store = Arc::new(MemStorage::new());
    info!("In-memory storage initialized");

    // Build app state
    let state = AppState {
        store,
        parser: Arc::new(parser),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
