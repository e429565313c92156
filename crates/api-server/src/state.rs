//! Application state

use std::sync::Arc;

use chat_core::IntentRouter;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    router: IntentRouter,
    tool_server_url: String,
}

impl AppState {
    pub fn new(router: IntentRouter, tool_server_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                router,
                tool_server_url: tool_server_url.into(),
            }),
        }
    }

    /// Get reference to the intent router
    pub fn router(&self) -> &IntentRouter {
        &self.inner.router
    }

    pub fn tool_server_url(&self) -> &str {
        &self.inner.tool_server_url
    }
}
