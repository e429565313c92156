//! Chat request/response model definitions

use serde::{Deserialize, Serialize};

/// Inbound chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of a single trace step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Error,
}

/// One entry of the step-by-step narrative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based position, reassigned whenever a step is inserted
    pub step: usize,
    pub action: String,
    pub description: String,
    pub status: StepStatus,
}

/// Outcome of a tool as seen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolUsageStatus {
    Success,
    Error,
}

/// A tool that took part in producing the reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolUsage {
    pub name: String,
    pub description: String,
    pub status: ToolUsageStatus,
}

impl ToolUsage {
    pub fn success(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: ToolUsageStatus::Success,
        }
    }

    pub fn error(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: ToolUsageStatus::Error,
        }
    }
}

/// Structured account of how a reply was produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub steps: Vec<StepRecord>,
    pub tools_used: Vec<ToolUsage>,
    pub agent_name: String,
    pub model: String,
    pub success: bool,
    pub processing_time_ms: u64,
}

/// Reply returned from `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub trace: Trace,
}
