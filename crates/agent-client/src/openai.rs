//! OpenAI-compatible agent
//!
//! A single-shot agent: one system prompt, one user message, one completion.

use std::time::Duration;

use async_trait::async_trait;
use chat_core::{AgentClient, AgentReply};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ClientError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_AGENT_NAME: &str = "demo-agent";
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful assistant that can perform mathematical calculations. For now, just respond to math questions directly.";

/// Configuration for the agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub name: String,
    pub instructions: String,
    pub timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            name: DEFAULT_AGENT_NAME.to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [CompletionMessage<'a>; 2],
}

#[derive(Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiAgent {
    client: Client,
    config: AgentConfig,
}

impl OpenAiAgent {
    pub fn new(config: AgentConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { client, config })
    }

    async fn complete(&self, message: &str) -> Result<AgentReply> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = CompletionRequest {
            model: &self.config.model,
            messages: [
                CompletionMessage {
                    role: "system",
                    content: &self.config.instructions,
                },
                CompletionMessage {
                    role: "user",
                    content: message,
                },
            ],
        };

        info!("Invoking {} with {}", self.config.name, self.config.model);

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::request(&url, e))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, body });
        }

        let completion: CompletionResponse = res
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        debug!("Completion served by {:?}", completion.model);

        let output = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ClientError::EmptyCompletion)?;

        Ok(AgentReply {
            output,
            model: completion.model,
        })
    }
}

#[async_trait]
impl AgentClient for OpenAiAgent {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn run(&self, message: &str) -> chat_core::Result<AgentReply> {
        Ok(self.complete(message).await?)
    }
}
