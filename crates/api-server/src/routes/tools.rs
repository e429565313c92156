//! Tool listing endpoint

use axum::{extract::State, routing::get, Json, Router};
use chat_core::ToolDescriptor;

use crate::state::AppState;

/// GET /api/tools - Tools advertised by the tool server (empty if unreachable)
async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolDescriptor>> {
    Json(state.router().tools().list_tools().await)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/tools", get(list_tools))
}
