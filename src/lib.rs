//! RAG Backend - Library Entry Point
//!
//! A thin HTTP front for an Azure OpenAI deployment: answers questions via
//! chat completions and turns text into embedding vectors.

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use clients::AzureOpenAiClient;
pub use config::Config;
pub use error::{GatewayError, GatewayResult};
pub use handlers::{router, AppState};
pub use services::RagOrchestrator;
pub use traits::{ChatClient, ChatMessage, EmbeddingClient};
