//! Error type for calls to the language-model gateway.

use thiserror::Error;

/// Failure of a single gateway call.
///
/// The `Display` text is what `/chat` embeds in its answer, so variants
/// render as plain one-line messages.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Something the call needs was not configured (e.g. a deployment name).
    #[error("{0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("Error code: {status} - {body}")]
    Api { status: u16, body: String },

    /// The gateway answered 2xx but the payload was not what we expect.
    #[error("Invalid response from gateway: {0}")]
    InvalidResponse(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
