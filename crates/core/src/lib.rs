//! Core library for the chat backend
//!
//! This crate contains the request-scoped business logic, including:
//! - Argument extraction from free-form messages
//! - Trace shaping (step records and tool usage)
//! - Tool and agent capability traits
//! - Intent routing between the local tools and the language model

pub mod agent;
pub mod error;
pub mod extract;
pub mod model;
pub mod router;
pub mod tool;
pub mod trace;

pub use agent::{AgentClient, AgentReply};
pub use error::{Error, ToolError};
pub use model::{ChatRequest, ChatResponse, StepRecord, StepStatus, ToolUsage, ToolUsageStatus, Trace};
pub use router::IntentRouter;
pub use tool::{call_tool, ToolCallResult, ToolDescriptor, ToolInvoker};
pub use trace::TraceBuilder;

pub type Result<T> = std::result::Result<T, Error>;
