//! Agent Client - HTTP transports for the chat backend
//!
//! This crate provides the network side of the router's capabilities:
//! the REST tool client and the OpenAI-compatible agent.

mod client;
mod error;
mod openai;

pub use client::{RestToolClient, TOOL_CALL_TIMEOUT};
pub use error::{ClientError, Result};
pub use openai::{
    AgentConfig, OpenAiAgent, DEFAULT_AGENT_NAME, DEFAULT_BASE_URL, DEFAULT_INSTRUCTIONS,
    DEFAULT_MODEL,
};
