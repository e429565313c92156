//! Tool service state

use std::time::Duration;

/// Shared state for the tool routes
#[derive(Clone, Debug)]
pub struct ToolState {
    /// Simulated backend latency for password resets
    pub reset_latency: Duration,
}
