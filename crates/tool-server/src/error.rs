//! Error types for the tool service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolServiceError>;

#[derive(Debug, Error)]
pub enum ToolServiceError {
    #[error("Tool '{0}' not found")]
    UnknownTool(String),

    #[error("Invalid arguments for '{tool}': {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("Integer overflow adding {a} and {b}")]
    Overflow { a: i64, b: i64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolServiceError {
    pub fn invalid_arguments(tool: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: source.to_string(),
        }
    }
}
