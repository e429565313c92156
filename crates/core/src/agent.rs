//! Language-model agent capability
//!
//! The router only needs "send a message, get text back"; the provider
//! behind it is opaque.

use async_trait::async_trait;

use crate::Result;

/// Text produced by a single agent run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    pub output: String,
    /// Model that actually served the request, when the provider reports it
    pub model: Option<String>,
}

#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Display name used in traces
    fn name(&self) -> &str;

    /// Configured model identifier
    fn model(&self) -> &str;

    /// Run the agent on a single user message
    async fn run(&self, message: &str) -> Result<AgentReply>;
}
