//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The language-model agent could not produce a reply
    #[error("Agent error: {0}")]
    Agent(String),
}

/// Failure of a single remote tool invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// The tool service answered with a non-200 status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Timeout, refused connection, DNS failure and the like
    #[error("{0}")]
    Transport(String),

    /// The tool answered 200 but the body was not what the caller expected
    #[error("Invalid tool response: {0}")]
    InvalidResponse(String),
}
