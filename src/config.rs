//! Configuration module for the RAG backend.

use thiserror::Error;

/// Configuration errors raised at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Main service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    /// Base URL of the Azure OpenAI resource.
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub chat_deployment: Option<String>,
    pub embedding_deployment: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| non_empty(name).ok_or(ConfigError::Missing(name));

        let port: u16 = match non_empty("PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: p,
            })?,
            None => 8000,
        };

        Ok(Self {
            port,
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            endpoint: required("AZURE_OPENAI_ENDPOINT")?,
            api_key: required("AZURE_OPENAI_API_KEY")?,
            api_version: required("API_VERSION")?,
            chat_deployment: non_empty("AZURE_OPENAI_CHAT_DEPLOYMENT"),
            embedding_deployment: non_empty("AZURE_OPENAI_EMBEDDING_DEPLOYMENT"),
        })
    }

    /// Address string to bind the HTTP listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
