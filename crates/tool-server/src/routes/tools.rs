//! Tool API endpoints
//!
//! `GET /tools` lists the tools, `POST /call/{name}` runs one with a JSON
//! object of named arguments and answers with the tool's raw result.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chat_core::ToolDescriptor;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::ToolServiceError;
use crate::state::ToolState;
use crate::tools;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /tools - List available tools
async fn list_tools() -> Json<Vec<ToolDescriptor>> {
    Json(tools::descriptors())
}

/// POST /call/{name} - Invoke a tool
async fn call_tool(
    State(state): State<ToolState>,
    Path(name): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    let Json(args) = body.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.body_text(),
            }),
        )
    })?;

    info!(tool = %name, "Tool call");
    let result = tools::invoke(&name, args, state.reset_latency)
        .await
        .map_err(map_tool_error)?;

    Ok(Json(result))
}

fn map_tool_error(err: ToolServiceError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        ToolServiceError::UnknownTool(_) => StatusCode::NOT_FOUND,
        ToolServiceError::InvalidArguments { .. } | ToolServiceError::Overflow { .. } => {
            StatusCode::BAD_REQUEST
        }
        ToolServiceError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!("Tool call rejected: {}", err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

pub fn router() -> Router<ToolState> {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/call/{name}", post(call_tool))
}
