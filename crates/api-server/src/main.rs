//! Chat server
//!
//! This is the main entry point for the chat backend.
//! It serves `POST /chat` on port 3000 and forwards tool calls to the
//! tool server.

mod config;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use agent_client::{OpenAiAgent, RestToolClient};
use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use chat_core::IntentRouter;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::AppState;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "chat_server=debug,chat_core=debug,agent_client=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!("Using tool server at {}", config.tool_server_url);

    let tools = RestToolClient::new(config.tool_server_url.clone())
        .context("Failed to create tool client")?;
    let agent = OpenAiAgent::new(config.agent.clone()).context("Failed to create agent")?;
    tracing::info!(
        "Agent {} ready with model {}",
        config.agent.name,
        config.agent.model
    );

    let router = IntentRouter::new(Arc::new(tools), Arc::new(agent));
    let app_state = AppState::new(router, config.tool_server_url.clone());

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::chat::router())
        .merge(routes::tools::router())
        .with_state(app_state)
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from((config.host, config.port));
    tracing::info!("Chat API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Chat server failed")?;

    Ok(())
}
