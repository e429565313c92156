//! Intent routing
//!
//! Each message takes exactly one branch, chosen first-match in priority
//! order: arithmetic, password reset, then the general language model.

use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{error, info};

use crate::agent::AgentClient;
use crate::error::ToolError;
use crate::extract::{extract_addition_operands, extract_email, without_emails};
use crate::model::{ChatResponse, StepStatus, ToolUsage};
use crate::tool::{call_tool, ToolInvoker};
use crate::trace::TraceBuilder;
use crate::Result;

pub const ADD_TOOL: &str = "add";
pub const RESET_TOOL: &str = "reset_camas_password";

const ACTION_TOOL: &str = "Tool Execution";
const ACTION_ARGUMENTS: &str = "Argument Extraction";
const ACTION_EMAIL: &str = "Email Extraction";
const ACTION_AGENT: &str = "Agent Invocation";

// Inflections are listed rather than prefix-matched so "address" stays out.
static ARITHMETIC_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:add(?:s|ed|ing|itions?)?|plus(?:es)?|sum(?:s|med|ming|mations?)?)\b",
    )
    .expect("valid keyword pattern")
});

static RESET_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:reset|password|camas)").expect("valid keyword pattern"));

/// Handling path for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Arithmetic,
    Reset,
    General,
}

/// Pick the branch for `message`.
///
/// Email addresses are blanked before matching so that `a+b@x.io` does not
/// read as an addition.
pub fn select_branch(message: &str) -> Branch {
    let text = without_emails(message);
    if text.contains('+') || ARITHMETIC_WORDS.is_match(&text) {
        Branch::Arithmetic
    } else if RESET_WORDS.is_match(&text) {
        Branch::Reset
    } else {
        Branch::General
    }
}

/// Result body of the `reset_camas_password` tool
#[derive(Debug, Deserialize)]
struct ResetReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    reset_token: Option<String>,
    #[serde(default)]
    expires_in: Option<String>,
}

struct Outcome {
    reply: String,
    generation: &'static str,
    model: Option<String>,
}

impl Outcome {
    fn local(reply: String, generation: &'static str) -> Self {
        Self {
            reply,
            generation,
            model: None,
        }
    }
}

pub struct IntentRouter {
    tools: Arc<dyn ToolInvoker>,
    agent: Arc<dyn AgentClient>,
}

impl IntentRouter {
    pub fn new(tools: Arc<dyn ToolInvoker>, agent: Arc<dyn AgentClient>) -> Self {
        Self { tools, agent }
    }

    pub fn tools(&self) -> &Arc<dyn ToolInvoker> {
        &self.tools
    }

    pub fn agent(&self) -> &Arc<dyn AgentClient> {
        &self.agent
    }

    /// Produce a reply and trace for `message`. Never fails: any error is
    /// turned into an `Error: ...` reply with a failed trace.
    pub async fn handle(&self, message: &str) -> ChatResponse {
        let started = Instant::now();
        match self.dispatch(message, started).await {
            Ok(response) => response,
            Err(e) => {
                error!("Chat request failed: {}", e);
                let detail = e.to_string();
                ChatResponse {
                    reply: format!("Error: {}", detail),
                    trace: TraceBuilder::failed(
                        message,
                        &detail,
                        self.agent.name(),
                        self.agent.model(),
                        started.elapsed(),
                    ),
                }
            }
        }
    }

    async fn dispatch(&self, message: &str, started: Instant) -> Result<ChatResponse> {
        let mut trace = TraceBuilder::received(message);
        let branch = select_branch(message);
        info!(?branch, "Routing message");

        let outcome = match branch {
            Branch::Arithmetic => self.arithmetic(message, &mut trace).await?,
            Branch::Reset => self.reset(message, &mut trace).await,
            Branch::General => self.general(message, &mut trace).await?,
        };

        let model = outcome.model.as_deref().unwrap_or(self.agent.model());
        let trace = trace.finish(
            outcome.generation,
            self.agent.name(),
            model,
            started.elapsed(),
        );

        Ok(ChatResponse {
            reply: outcome.reply,
            trace,
        })
    }

    async fn arithmetic(&self, message: &str, trace: &mut TraceBuilder) -> Result<Outcome> {
        let Some((a, b)) = extract_addition_operands(message) else {
            trace.push(
                ACTION_ARGUMENTS,
                "No operands found; falling back to the language model",
                StepStatus::Completed,
            );
            return self.general(message, trace).await;
        };

        let mut args = Map::new();
        args.insert("a".to_string(), json!(a));
        args.insert("b".to_string(), json!(b));
        let result = call_tool(self.tools.as_ref(), ADD_TOOL, args).await;

        let sum = result.result.as_ref().and_then(integer_result);
        let reply = match sum {
            Some(sum) if result.success => {
                trace.tool(ToolUsage::success(ADD_TOOL, format!("Added {} and {}", a, b)));
                trace.push(
                    ACTION_TOOL,
                    format!("Called {} tool with a={}, b={}: {}", ADD_TOOL, a, b, sum),
                    StepStatus::Completed,
                );
                format!("The sum of {} and {} is {}.", a, b, sum)
            }
            _ => {
                let detail = result
                    .error
                    .unwrap_or_else(|| "tool returned a non-integer result".to_string());
                trace.tool(ToolUsage::error(ADD_TOOL, format!("Failed to add {} and {}", a, b)));
                trace.push(
                    ACTION_TOOL,
                    format!("{} tool failed: {}", ADD_TOOL, detail),
                    StepStatus::Error,
                );
                format!("Sorry, I couldn't add {} and {}: {}", a, b, detail)
            }
        };

        Ok(Outcome::local(reply, "Formatting result of the add tool"))
    }

    async fn reset(&self, message: &str, trace: &mut TraceBuilder) -> Outcome {
        let Some(email) = extract_email(message) else {
            trace.push(
                ACTION_EMAIL,
                "No email address found in message",
                StepStatus::Completed,
            );
            return Outcome::local(
                "Please provide the email address associated with your CAMAS account so I can reset your password."
                    .to_string(),
                "Requesting the missing email address",
            );
        };

        let mut args = Map::new();
        args.insert("email".to_string(), json!(email));
        let result = call_tool(self.tools.as_ref(), RESET_TOOL, args).await;

        let parsed = if result.success {
            result
                .result
                .ok_or_else(|| ToolError::InvalidResponse("empty body".to_string()))
                .and_then(|value| {
                    serde_json::from_value::<ResetReply>(value)
                        .map_err(|e| ToolError::InvalidResponse(e.to_string()))
                })
                .map_err(|e| e.to_string())
        } else {
            Err(result.error.unwrap_or_default())
        };

        let reply = match parsed {
            Ok(outcome) => {
                trace.tool(ToolUsage::success(
                    RESET_TOOL,
                    format!("Requested a password reset for {}", email),
                ));
                if outcome.success {
                    trace.push(
                        ACTION_TOOL,
                        format!("Called {} tool for {}", RESET_TOOL, email),
                        StepStatus::Completed,
                    );
                    format!(
                        "Password reset initiated for {}. Reset token: {} (expires in {}).",
                        email,
                        outcome.reset_token.as_deref().unwrap_or("unavailable"),
                        outcome.expires_in.as_deref().unwrap_or("24 hours"),
                    )
                } else {
                    let detail = outcome.message.unwrap_or_else(|| "unknown error".to_string());
                    trace.push(
                        ACTION_TOOL,
                        format!("{} tool declined the request: {}", RESET_TOOL, detail),
                        StepStatus::Completed,
                    );
                    format!("Password reset failed: {}", detail)
                }
            }
            Err(detail) => {
                trace.tool(ToolUsage::error(
                    RESET_TOOL,
                    format!("Could not request a password reset for {}", email),
                ));
                trace.push(
                    ACTION_TOOL,
                    format!("{} tool failed: {}", RESET_TOOL, detail),
                    StepStatus::Error,
                );
                format!(
                    "Sorry, the password reset service is unavailable right now: {}",
                    detail
                )
            }
        };

        Outcome::local(reply, "Formatting result of the password reset tool")
    }

    async fn general(&self, message: &str, trace: &mut TraceBuilder) -> Result<Outcome> {
        trace.push(
            ACTION_AGENT,
            format!("Invoking {} with {}", self.agent.name(), self.agent.model()),
            StepStatus::Completed,
        );
        let reply = self.agent.run(message).await?;

        Ok(Outcome {
            reply: reply.output,
            generation: "Generating response using the language model",
            model: reply.model,
        })
    }
}

/// Sum returned by the `add` tool, either bare or as `{"result": n}`
fn integer_result(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.get("result").and_then(Value::as_i64))
}
