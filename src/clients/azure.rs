//! Azure OpenAI gateway client.
//!
//! Talks to the deployment-scoped REST endpoints of an Azure OpenAI resource,
//! optionally fronted by API Management (hence the subscription-key header).

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{GatewayError, GatewayResult};
use crate::traits::{ChatClient, ChatMessage, EmbeddingClient};

/// Header carrying the API key for Azure OpenAI.
const API_KEY_HEADER: &str = "api-key";
/// Header API Management checks; it carries the same key.
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, Serialize)]
struct AzureChatRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct AzureChatResponse {
    choices: Vec<AzureChoice>,
}

#[derive(Debug, Deserialize)]
struct AzureChoice {
    #[serde(default)]
    index: u32,
    message: AzureChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzureChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct AzureEmbeddingRequest<'a> {
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct AzureEmbeddingResponse {
    data: Vec<AzureEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct AzureEmbeddingData {
    embedding: Vec<f64>,
}

/// Azure OpenAI client serving both chat completions and embeddings.
pub struct AzureOpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    chat_deployment: Option<String>,
    embedding_deployment: Option<String>,
}

impl AzureOpenAiClient {
    /// Create a new client from explicit settings.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_version: api_version.into(),
            chat_deployment: None,
            embedding_deployment: None,
        }
    }

    /// Create a client from the service configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut client = Self::new(&config.endpoint, &config.api_key, &config.api_version);
        client.chat_deployment = config.chat_deployment.clone();
        client.embedding_deployment = config.embedding_deployment.clone();
        client
    }

    pub fn with_chat_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.chat_deployment = Some(deployment.into());
        self
    }

    pub fn with_embedding_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.embedding_deployment = Some(deployment.into());
        self
    }

    fn deployment_url(&self, deployment: &str, operation: &str) -> String {
        format!(
            "{}/openai/deployments/{}/{}",
            self.endpoint, deployment, operation
        )
    }

    /// POST a JSON body to a deployment operation and decode the reply.
    async fn post_json<B, R>(&self, deployment: &str, operation: &str, body: &B) -> GatewayResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.deployment_url(deployment, operation);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", self.api_version.as_str())])
            .header(API_KEY_HEADER, &self.api_key)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ChatClient for AzureOpenAiClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> GatewayResult<String> {
        let deployment = self
            .chat_deployment
            .as_deref()
            .ok_or_else(|| GatewayError::Config("chat deployment is not configured".to_string()))?;

        let response: AzureChatResponse = self
            .post_json(
                deployment,
                "chat/completions",
                &AzureChatRequest {
                    messages: &messages,
                },
            )
            .await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("no choices returned".to_string()))?;

        debug!(
            index = choice.index,
            finish_reason = ?choice.finish_reason,
            content = ?choice.message.content,
            "first completion choice"
        );

        choice.message.content.ok_or_else(|| {
            GatewayError::InvalidResponse("completion choice has no content".to_string())
        })
    }

    fn provider_name(&self) -> &str {
        "azure-openai"
    }
}

#[async_trait]
impl EmbeddingClient for AzureOpenAiClient {
    async fn embed(&self, text: &str) -> GatewayResult<Vec<f64>> {
        let deployment = self.embedding_deployment.as_deref().ok_or_else(|| {
            GatewayError::Config("embedding deployment is not configured".to_string())
        })?;

        let response: AzureEmbeddingResponse = self
            .post_json(deployment, "embeddings", &AzureEmbeddingRequest { input: text })
            .await?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| GatewayError::InvalidResponse("no embedding returned".to_string()))
    }

    fn provider_name(&self) -> &str {
        "azure-openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Spawn a stub gateway on an ephemeral port and return its base URL.
    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Echo back what the gateway saw so the test can assert on it.
    async fn echo_chat(
        Path(deployment): Path<String>,
        Query(query): Query<HashMap<String, String>>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let summary = json!({
            "deployment": deployment,
            "api_version": query.get("api-version"),
            "api_key": headers.get("api-key").and_then(|v| v.to_str().ok()),
            "subscription": headers
                .get("ocp-apim-subscription-key")
                .and_then(|v| v.to_str().ok()),
            "messages": body["messages"],
        });
        Json(json!({
            "choices": [
                {"index": 0, "finish_reason": "stop", "message": {"role": "assistant", "content": summary.to_string()}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        }))
    }

    fn client(base: &str) -> AzureOpenAiClient {
        AzureOpenAiClient::new(format!("{}/", base), "key-123", "2024-02-01")
            .with_chat_deployment("chat-dep")
            .with_embedding_deployment("embed-dep")
    }

    #[test]
    fn test_deployment_url_trims_trailing_slash() {
        let client = AzureOpenAiClient::new("https://res.openai.azure.com/", "k", "v");
        assert_eq!(
            client.deployment_url("gpt", "chat/completions"),
            "https://res.openai.azure.com/openai/deployments/gpt/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_chat_request_shape_and_first_choice() {
        let app = Router::new().route(
            "/openai/deployments/:deployment/chat/completions",
            post(echo_chat),
        );
        let base = spawn_stub(app).await;

        let answer = client(&base)
            .complete(vec![ChatMessage::system("sys"), ChatMessage::user("hi")])
            .await
            .unwrap();

        let seen: Value = serde_json::from_str(&answer).unwrap();
        assert_eq!(seen["deployment"], "chat-dep");
        assert_eq!(seen["api_version"], "2024-02-01");
        assert_eq!(seen["api_key"], "key-123");
        assert_eq!(seen["subscription"], "key-123");
        assert_eq!(
            seen["messages"],
            json!([
                {"role": "system", "content": "sys"},
                {"role": "user", "content": "hi"}
            ])
        );
    }

    #[tokio::test]
    async fn test_embedding_returns_first_vector() {
        let app = Router::new().route(
            "/openai/deployments/:deployment/embeddings",
            post(|Path(deployment): Path<String>, Json(body): Json<Value>| async move {
                assert_eq!(deployment, "embed-dep");
                assert_eq!(body["input"], "hello");
                Json(json!({
                    "object": "list",
                    "data": [{"object": "embedding", "index": 0, "embedding": [0.25, -0.5, 1.0]}],
                    "model": "text-embedding-3-small"
                }))
            }),
        );
        let base = spawn_stub(app).await;

        let vector = client(&base).embed("hello").await.unwrap();
        assert_eq!(vector, vec![0.25, -0.5, 1.0]);
    }

    #[tokio::test]
    async fn test_embedding_keeps_full_precision() {
        let app = Router::new().route(
            "/openai/deployments/:deployment/embeddings",
            post(|| async {
                Json(json!({"data": [{"index": 0, "embedding": [-0.0123456789012345, 0.987654321]}]}))
            }),
        );
        let base = spawn_stub(app).await;

        let vector = client(&base).embed("hello").await.unwrap();
        assert_eq!(vector, vec![-0.0123456789012345, 0.987654321]);
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_api_error() {
        let app = Router::new().route(
            "/openai/deployments/:deployment/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "access denied") }),
        );
        let base = spawn_stub(app).await;

        let err = client(&base)
            .complete(vec![ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Api { status: 401, .. }));
        assert_eq!(err.to_string(), "Error code: 401 - access denied");
    }

    #[tokio::test]
    async fn test_null_content_is_invalid_response() {
        let app = Router::new().route(
            "/openai/deployments/:deployment/chat/completions",
            post(|| async {
                Json(json!({"choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]}))
            }),
        );
        let base = spawn_stub(app).await;

        let err = client(&base)
            .complete(vec![ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_data_is_invalid_response() {
        let app = Router::new().route(
            "/openai/deployments/:deployment/embeddings",
            post(|| async { Json(json!({"data": []})) }),
        );
        let base = spawn_stub(app).await;

        let err = client(&base).embed("hello").await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_deployment_is_config_error() {
        let client = AzureOpenAiClient::new("http://127.0.0.1:1", "k", "v");
        let err = client
            .complete(vec![ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));

        let err = client.embed("hello").await.unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }
}
