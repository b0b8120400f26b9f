//! RAG orchestrator service.
//!
//! Validates incoming text, calls the gateway clients and reports the result
//! as an explicit outcome. The HTTP layer decides how each outcome is shown.

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::GatewayError;
use crate::traits::{ChatClient, ChatMessage, EmbeddingClient};

/// System instruction sent ahead of every user question.
pub const SYSTEM_PROMPT: &str = "You answer user questions.";

/// True when `text` holds nothing but whitespace.
///
/// The ASCII information separators U+001C..=U+001F count as blank too.
pub fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

/// Result of answering a chat question.
#[derive(Debug)]
pub enum ChatOutcome {
    /// The question was empty or whitespace; the gateway was not called.
    EmptyQuestion,
    Answered(String),
    Failed(GatewayError),
}

/// Result of embedding a text.
#[derive(Debug)]
pub enum EmbedOutcome {
    /// The text was empty or whitespace; the gateway was not called.
    EmptyText,
    Embedded(Vec<f64>),
    Failed(GatewayError),
}

/// Holds the gateway clients shared by every request.
pub struct RagOrchestrator {
    chat: Arc<dyn ChatClient>,
    embedder: Arc<dyn EmbeddingClient>,
}

impl RagOrchestrator {
    pub fn new(chat: Arc<dyn ChatClient>, embedder: Arc<dyn EmbeddingClient>) -> Self {
        info!(
            "Orchestrator ready (chat: {}, embeddings: {})",
            chat.provider_name(),
            embedder.provider_name()
        );
        Self { chat, embedder }
    }

    /// Answer a single question with a fixed system instruction.
    ///
    /// The question is forwarded as received; blankness is only used to
    /// decide whether it is empty.
    pub async fn answer(&self, question: &str) -> ChatOutcome {
        if is_blank(question) {
            return ChatOutcome::EmptyQuestion;
        }

        let messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(question)];
        match self.chat.complete(messages).await {
            Ok(answer) => {
                debug!("Chat completion returned {} chars", answer.chars().count());
                ChatOutcome::Answered(answer)
            }
            Err(e) => ChatOutcome::Failed(e),
        }
    }

    /// Embed a single text.
    pub async fn embed(&self, text: &str) -> EmbedOutcome {
        if is_blank(text) {
            return EmbedOutcome::EmptyText;
        }

        match self.embedder.embed(text).await {
            Ok(embedding) => EmbedOutcome::Embedded(embedding),
            Err(e) => EmbedOutcome::Failed(e),
        }
    }
}
