//! Shared fixtures for route tests

use std::sync::Arc;
use std::time::Duration;

use agent_client::RestToolClient;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Response, StatusCode},
};
use chat_core::{AgentClient, AgentReply, IntentRouter};
use serde_json::Value;
use tool_server::ToolState;

use crate::state::AppState;

pub struct StubAgent {
    failure: Option<String>,
}

impl StubAgent {
    pub fn replying() -> Arc<Self> {
        Arc::new(Self { failure: None })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(message.to_string()),
        })
    }
}

#[async_trait]
impl AgentClient for StubAgent {
    fn name(&self) -> &str {
        "demo-agent"
    }

    fn model(&self) -> &str {
        "gpt-4o-mini"
    }

    async fn run(&self, message: &str) -> chat_core::Result<AgentReply> {
        match &self.failure {
            Some(e) => Err(chat_core::Error::Agent(e.clone())),
            None => Ok(AgentReply {
                output: format!("You said: {}", message),
                model: None,
            }),
        }
    }
}

/// Start the real tool service in-process and return its base URL
pub async fn spawn_tool_server() -> String {
    let app = tool_server::app(ToolState {
        reset_latency: Duration::ZERO,
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn build_state(tool_server_url: &str, agent: Arc<dyn AgentClient>) -> AppState {
    let tools = Arc::new(RestToolClient::new(tool_server_url).unwrap());
    AppState::new(IntentRouter::new(tools, agent), tool_server_url)
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}
