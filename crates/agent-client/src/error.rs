//! Error types for agent-client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while talking to the language-model provider
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// No API key was configured
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// Request never got an HTTP answer
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Provider answered with an error status
    #[error("Provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Provider answered 200 but without usable text
    #[error("Provider returned no completion text")]
    EmptyCompletion,

    /// Response body could not be decoded
    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Create a Request error
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.into(),
            message: source.to_string(),
        }
    }
}

impl From<ClientError> for chat_core::Error {
    fn from(err: ClientError) -> Self {
        chat_core::Error::Agent(err.to_string())
    }
}
