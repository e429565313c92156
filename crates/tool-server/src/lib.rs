//! Local tool service
//!
//! HTTP surface for the `add` and `reset_camas_password` tools. The binary
//! in `main.rs` only reads its environment and serves [`app`].

pub mod error;
pub mod routes;
pub mod state;
pub mod tools;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::{Result, ToolServiceError};
pub use state::ToolState;

/// Build the tool service router with all routes mounted
pub fn app(state: ToolState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::tools::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
