//! API models for request/response types.
//!
//! Defines the JSON request/response structures for the RAG backend API.

use serde::{Deserialize, Deserializer, Serialize};

/// Greeting returned by `GET /`.
pub const GREETING: &str = "Hello from your RAG backend!";

/// Answer returned when `/chat` receives a blank question.
pub const EMPTY_QUESTION_ANSWER: &str = "Error: Your question is empty.";

/// Prefix of the answer returned when the gateway call fails.
pub const GATEWAY_ERROR_PREFIX: &str = "Error calling Azure OpenAI: ";

fn default_language() -> String {
    "en".to_string()
}

/// Treats an explicit `null` like an absent field.
fn language_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_language))
}

/// A prior turn of the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

/// Request for answering a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question.
    pub question: String,
    /// Earlier turns. Accepted but not forwarded to the model.
    #[serde(default)]
    pub history: Option<Vec<HistoryMessage>>,
    /// Answer language hint. Accepted but not forwarded to the model.
    #[serde(default = "default_language", deserialize_with = "language_or_default")]
    pub language: String,
}

/// Response for a chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The model's answer, or an error message.
    pub answer: String,
}

/// Request for embedding a single text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// The text to embed.
    pub text: String,
}

/// Response for a single embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// The embedding vector.
    pub embedding: Vec<f64>,
    /// Length of `embedding`.
    pub dimensions: usize,
}

impl EmbedResponse {
    /// The empty result, used for blank input and failures alike.
    pub fn empty() -> Self {
        Self::from_vector(Vec::new())
    }

    pub fn from_vector(embedding: Vec<f64>) -> Self {
        Self {
            dimensions: embedding.len(),
            embedding,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
