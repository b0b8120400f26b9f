//! HTTP handlers module.
//!
//! Provides the HTTP endpoints of the RAG backend. Gateway failures never
//! change the status code; they are folded into the response body.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::models::{
    ChatRequest, ChatResponse, EmbedRequest, EmbedResponse, HealthResponse, RootResponse,
    EMPTY_QUESTION_ANSWER, GATEWAY_ERROR_PREFIX, GREETING,
};
use crate::services::{ChatOutcome, EmbedOutcome, RagOrchestrator};

/// Application state shared across handlers.
pub struct AppState {
    pub orchestrator: RagOrchestrator,
}

/// Build the HTTP router with middleware attached.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/chat", post(chat))
        .route("/embed", post(embed))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: GREETING.to_string(),
    })
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Answer a question through the chat deployment.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    info!(
        "Chat question ({} chars), language: {}, history turns: {}",
        request.question.chars().count(),
        request.language,
        request.history.as_ref().map_or(0, Vec::len)
    );

    let answer = match state.orchestrator.answer(&request.question).await {
        ChatOutcome::EmptyQuestion => EMPTY_QUESTION_ANSWER.to_string(),
        ChatOutcome::Answered(answer) => answer,
        ChatOutcome::Failed(e) => {
            error!("Chat completion failed: {}", e);
            format!("{}{}", GATEWAY_ERROR_PREFIX, e)
        }
    };

    Json(ChatResponse { answer })
}

/// Embed a single text.
///
/// Failures yield the same empty body as blank input.
pub async fn embed(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EmbedRequest>,
) -> Json<EmbedResponse> {
    info!("Embedding single text ({} chars)", request.text.chars().count());

    let response = match state.orchestrator.embed(&request.text).await {
        EmbedOutcome::EmptyText => EmbedResponse::empty(),
        EmbedOutcome::Embedded(embedding) => EmbedResponse::from_vector(embedding),
        EmbedOutcome::Failed(e) => {
            warn!("Embedding failed, returning empty vector: {}", e);
            EmbedResponse::empty()
        }
    };

    Json(response)
}
