//! Chat endpoint
//!
//! `POST /chat` always answers 200 with `{reply, trace}` once the body
//! parses; failures inside the pipeline show up in the trace instead.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chat_core::{ChatRequest, ChatResponse};
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /chat - Route a message to a tool or the agent
async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(req) = body.map_err(|e| {
        (
            e.status(),
            Json(ErrorResponse {
                error: e.body_text(),
            }),
        )
    })?;

    let span = info_span!("chat", request_id = %Uuid::new_v4());
    let response = async {
        info!("Received message ({} chars)", req.message.len());
        let response = state.router().handle(&req.message).await;
        info!(
            success = response.trace.success,
            steps = response.trace.steps.len(),
            "Reply ready in {}ms",
            response.trace.processing_time_ms
        );
        response
    }
    .instrument(span)
    .await;

    Ok(Json(response))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}
