use std::time::Duration;

use async_trait::async_trait;
use chat_core::{ToolCallResult, ToolDescriptor, ToolError, ToolInvoker};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};

/// Upper bound for a single tool call
pub const TOOL_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// REST transport for the tool service (`GET /tools`, `POST /call/{name}`)
pub struct RestToolClient {
    client: Client,
    url: String,
}

impl RestToolClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, TOOL_CALL_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        // Disable proxy for local tool service communication
        let client = Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            url: url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Invoke `name` and capture any failure into the result
    pub async fn call_tool(&self, name: &str, args: Map<String, Value>) -> ToolCallResult {
        chat_core::call_tool(self, name, args).await
    }
}

#[async_trait]
impl ToolInvoker for RestToolClient {
    async fn invoke(
        &self,
        name: &str,
        args: Map<String, Value>,
    ) -> std::result::Result<Value, ToolError> {
        let url = format!("{}/call/{}", self.url, name);
        info!("Sending tool request: {}", url);
        let payload = Value::Object(args);
        debug!("Tool arguments: {}", payload);

        let res = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(ToolError::Http {
                status: status.as_u16(),
                body,
            });
        }

        res.json::<Value>()
            .await
            .map_err(|e| ToolError::InvalidResponse(e.to_string()))
    }

    async fn list_tools(&self) -> Vec<ToolDescriptor> {
        let url = format!("{}/tools", self.url);

        let res = match self.client.get(&url).send().await {
            Ok(res) if res.status().is_success() => res,
            Ok(res) => {
                warn!("Tool listing returned HTTP {}", res.status());
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to list tools: {}", e);
                return Vec::new();
            }
        };

        res.json::<Vec<ToolDescriptor>>().await.unwrap_or_else(|e| {
            warn!("Failed to parse tool listing: {}", e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::Path,
        http::StatusCode as AxumStatus,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    use super::*;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn unused_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn args(a: i64, b: i64) -> Map<String, Value> {
        let mut args = Map::new();
        args.insert("a".to_string(), json!(a));
        args.insert("b".to_string(), json!(b));
        args
    }

    #[tokio::test]
    async fn test_call_tool_success() {
        let app = Router::new().route(
            "/call/{name}",
            post(|Path(name): Path<String>, Json(body): Json<Value>| async move {
                assert_eq!(name, "add");
                Json(json!(body["a"].as_i64().unwrap() + body["b"].as_i64().unwrap()))
            }),
        );
        let client = RestToolClient::new(format!("{}/", spawn(app).await)).unwrap();

        let result = client.call_tool("add", args(25, 17)).await;

        assert!(result.success);
        assert_eq!(result.result, Some(json!(42)));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_call_tool_http_500() {
        let app = Router::new().route(
            "/call/{name}",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "tool exploded") }),
        );
        let client = RestToolClient::new(spawn(app).await).unwrap();

        let result = client.call_tool("add", args(1, 2)).await;

        assert!(!result.success);
        assert!(result.result.is_none());
        assert_eq!(result.error.as_deref(), Some("HTTP 500: tool exploded"));
    }

    #[tokio::test]
    async fn test_call_tool_connection_refused() {
        let client = RestToolClient::new(unused_url().await).unwrap();

        let result = client.call_tool("add", args(1, 2)).await;

        assert!(!result.success);
        assert!(!result.error.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_call_tool_timeout() {
        let app = Router::new().route(
            "/call/{name}",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!(0))
            }),
        );
        let client =
            RestToolClient::with_timeout(spawn(app).await, Duration::from_millis(100)).unwrap();

        let result = client.call_tool("add", args(1, 2)).await;

        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_list_tools() {
        let app = Router::new().route(
            "/tools",
            get(|| async {
                Json(json!([
                    { "name": "add", "description": "Return a + b", "parameters": { "type": "object" } }
                ]))
            }),
        );
        let client = RestToolClient::new(spawn(app).await).unwrap();

        let tools = client.list_tools().await;

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "add");
    }

    #[tokio::test]
    async fn test_list_tools_swallows_failures() {
        let client = RestToolClient::new(unused_url().await).unwrap();
        assert!(client.list_tools().await.is_empty());

        let app = Router::new().route("/tools", get(|| async { "not json" }));
        let client = RestToolClient::new(spawn(app).await).unwrap();
        assert!(client.list_tools().await.is_empty());
    }
}
