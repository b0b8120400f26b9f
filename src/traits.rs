//! Core traits for gateway clients.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::GatewayResult;

/// A single message of a chat exchange sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Trait for clients that produce chat completions.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the messages to the chat deployment and return the text of the
    /// first completion choice.
    async fn complete(&self, messages: Vec<ChatMessage>) -> GatewayResult<String>;

    /// Get the provider name.
    fn provider_name(&self) -> &str;
}

/// Trait for clients that generate embeddings.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> GatewayResult<Vec<f64>>;

    /// Get the provider name.
    fn provider_name(&self) -> &str;
}
