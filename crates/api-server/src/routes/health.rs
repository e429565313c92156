//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    tool_server_url: String,
    agent_name: String,
    model: String,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let agent = state.router().agent();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tool_server_url: state.tool_server_url().to_string(),
        agent_name: agent.name().to_string(),
        model: agent.model().to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
