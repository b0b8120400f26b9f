//! RAG Backend - Main Entry Point
//!
//! Forwards chat and embedding requests to Azure OpenAI.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rag_backend::clients::AzureOpenAiClient;
use rag_backend::config::Config;
use rag_backend::handlers::{self, AppState};
use rag_backend::services::RagOrchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "rag_backend=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("invalid configuration")?;

    info!("🚀 Starting RAG backend v{}", env!("CARGO_PKG_VERSION"));
    info!("🔗 Endpoint: {} (api-version {})", config.endpoint, config.api_version);
    info!(
        "💬 Chat deployment: {}",
        config.chat_deployment.as_deref().unwrap_or("<unset>")
    );
    info!(
        "📐 Embedding deployment: {}",
        config.embedding_deployment.as_deref().unwrap_or("<unset>")
    );

    // One client handle serves both capabilities
    let client = Arc::new(AzureOpenAiClient::from_config(&config));
    let state = Arc::new(AppState {
        orchestrator: RagOrchestrator::new(client.clone(), client),
    });

    let app = handlers::router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to address: {}", addr))?;
    info!("✅ RAG backend listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
