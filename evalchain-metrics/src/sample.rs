use serde::{Deserialize, Serialize};

use evalchain_core::{ToolCall, Trajectory};

/// One agent conversation plus whatever ground truth the caller has.
/// Each metric checks for the reference data it needs and errors when that
/// data is absent rather than scoring zero.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AgentSample {
    pub trajectory: Trajectory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_topics: Option<Vec<String>>,
}

impl AgentSample {
    pub fn new(trajectory: Trajectory) -> Self {
        Self {
            trajectory,
            reference_tool_calls: None,
            reference_goal: None,
            reference_topics: None,
        }
    }

    pub fn with_reference_tool_calls(mut self, calls: Vec<ToolCall>) -> Self {
        self.reference_tool_calls = Some(calls);
        self
    }

    pub fn with_reference_goal(mut self, goal: impl Into<String>) -> Self {
        self.reference_goal = Some(goal.into());
        self
    }

    pub fn with_reference_topics(mut self, topics: Vec<String>) -> Self {
        self.reference_topics = Some(topics);
        self
    }
}

/// One question answered by a RAG pipeline, with the context passages the
/// pipeline used and an optional ground-truth answer.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RagSample {
    pub question: String,
    pub answer: String,
    pub contexts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_truth: Option<String>,
}
