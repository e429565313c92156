//! Remote tool capability
//!
//! `ToolInvoker` is the transport seam: a REST client, a session-based tool
//! protocol or an in-memory double all look the same to the router.
//! `call_tool` folds every failure into a `ToolCallResult` so callers never
//! see an error escape a tool invocation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::ToolError;

/// Tool metadata as published by `GET /tools`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: Value,
}

#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Invoke `name` with named arguments and return the tool's raw result
    async fn invoke(&self, name: &str, args: Map<String, Value>) -> Result<Value, ToolError>;

    /// Tools the remote side advertises. Best effort: empty on failure.
    async fn list_tools(&self) -> Vec<ToolDescriptor>;
}

/// Normalized outcome of one tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub success: bool,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl ToolCallResult {
    pub fn ok(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

impl From<Result<Value, ToolError>> for ToolCallResult {
    fn from(result: Result<Value, ToolError>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Invoke a tool and capture any failure into the result
pub async fn call_tool(
    invoker: &dyn ToolInvoker,
    name: &str,
    args: Map<String, Value>,
) -> ToolCallResult {
    info!(tool = name, "Calling tool");
    let result = ToolCallResult::from(invoker.invoke(name, args).await);
    if let Some(error) = &result.error {
        warn!(tool = name, "Tool call failed: {}", error);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingInvoker;

    #[async_trait]
    impl ToolInvoker for FailingInvoker {
        async fn invoke(&self, _name: &str, _args: Map<String, Value>) -> Result<Value, ToolError> {
            Err(ToolError::Http {
                status: 500,
                body: "Internal Server Error".to_string(),
            })
        }

        async fn list_tools(&self) -> Vec<ToolDescriptor> {
            Vec::new()
        }
    }

    #[test]
    fn test_result_from_ok() {
        let result = ToolCallResult::from(Ok(serde_json::json!(42)));
        assert!(result.success);
        assert_eq!(result.result, Some(serde_json::json!(42)));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_call_tool_captures_http_error() {
        let result = call_tool(&FailingInvoker, "add", Map::new()).await;
        assert!(!result.success);
        assert!(result.result.is_none());
        assert_eq!(result.error.as_deref(), Some("HTTP 500: Internal Server Error"));
    }

    #[test]
    fn test_descriptor_parameters_default() {
        let descriptor: ToolDescriptor = serde_json::from_value(serde_json::json!({
            "name": "add",
            "description": "Return a + b"
        }))
        .unwrap();
        assert_eq!(descriptor.parameters, Value::Null);
    }
}
