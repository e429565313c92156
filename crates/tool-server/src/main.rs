//! Tool server for the chat backend
//!
//! Exposes the `add` and `reset_camas_password` tools over HTTP on port 5000.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tool_server::ToolState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tool_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host: std::net::IpAddr = env_or("TOOL_HOST", [0, 0, 0, 0].into());
    let port: u16 = env_or("TOOL_PORT", 5000);
    let state = ToolState {
        reset_latency: Duration::from_millis(env_or("TOOL_RESET_LATENCY_MS", 500)),
    };

    let app = tool_server::app(state);

    let addr = SocketAddr::from((host, port));
    tracing::info!("Tool server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Tool server failed")?;

    Ok(())
}
