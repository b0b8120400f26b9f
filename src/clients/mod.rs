//! Gateway clients module.

pub mod azure;

pub use azure::AzureOpenAiClient;
