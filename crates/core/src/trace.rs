//! Step trace assembly
//!
//! The builder owns step numbering: numbers are always `1..=n` in order,
//! even after a step is inserted in the middle of the sequence.

use std::time::Duration;

use crate::model::{StepRecord, StepStatus, ToolUsage, ToolUsageStatus, Trace};

pub const ACTION_RECEIVED: &str = "Message Received";
pub const ACTION_GENERATION: &str = "Response Generation";
pub const ACTION_DELIVERY: &str = "Response Delivery";
pub const ACTION_ERROR: &str = "Error Occurred";

#[derive(Debug, Default)]
pub struct TraceBuilder {
    steps: Vec<StepRecord>,
    tools_used: Vec<ToolUsage>,
}

impl TraceBuilder {
    /// Start a trace with the `Message Received` step
    pub fn received(message: &str) -> Self {
        let mut builder = Self::default();
        builder.push(
            ACTION_RECEIVED,
            format!("Processing user query: '{}'", message),
            StepStatus::Completed,
        );
        builder
    }

    /// Append a step numbered after the current last one
    pub fn push(
        &mut self,
        action: impl Into<String>,
        description: impl Into<String>,
        status: StepStatus,
    ) -> &mut Self {
        self.steps.push(StepRecord {
            step: self.steps.len() + 1,
            action: action.into(),
            description: description.into(),
            status,
        });
        self
    }

    /// Insert a step at `index` (0-based) and renumber everything after it
    pub fn insert(
        &mut self,
        index: usize,
        action: impl Into<String>,
        description: impl Into<String>,
        status: StepStatus,
    ) -> &mut Self {
        let index = index.min(self.steps.len());
        self.steps.insert(
            index,
            StepRecord {
                step: 0,
                action: action.into(),
                description: description.into(),
                status,
            },
        );
        for (i, step) in self.steps.iter_mut().enumerate().skip(index) {
            step.step = i + 1;
        }
        self
    }

    pub fn tool(&mut self, usage: ToolUsage) -> &mut Self {
        self.tools_used.push(usage);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append the trailing generation/delivery steps and seal the trace.
    pub fn finish(
        mut self,
        generation: &str,
        agent_name: &str,
        model: &str,
        elapsed: Duration,
    ) -> Trace {
        self.push(ACTION_GENERATION, generation, StepStatus::Completed);
        self.push(
            ACTION_DELIVERY,
            "Delivering formatted response to user",
            StepStatus::Completed,
        );
        self.build(agent_name, model, elapsed)
    }

    /// Two-step trace for a request that failed outright
    pub fn failed(
        message: &str,
        error: &str,
        agent_name: &str,
        model: &str,
        elapsed: Duration,
    ) -> Trace {
        let mut builder = Self::received(message);
        builder.push(ACTION_ERROR, error, StepStatus::Error);
        builder.build(agent_name, model, elapsed)
    }

    fn build(self, agent_name: &str, model: &str, elapsed: Duration) -> Trace {
        let success = self.steps.iter().all(|s| s.status == StepStatus::Completed)
            && self
                .tools_used
                .iter()
                .all(|t| t.status == ToolUsageStatus::Success);

        Trace {
            steps: self.steps,
            tools_used: self.tools_used,
            agent_name: agent_name.to_string(),
            model: model.to_string(),
            success,
            processing_time_ms: elapsed.as_millis() as u64,
        }
    }
}
