mod error;
mod goal;
mod judge;
mod rag;
mod sample;
mod score;
mod tool_call;
mod topic;

pub use error::MetricError;
pub use goal::{AgentGoalAccuracyWithReference, AgentGoalAccuracyWithoutReference};
pub use rag::{
    evaluate, AnswerRelevancy, ContextPrecision, ContextRecall, Faithfulness, RagMetric,
};
pub use sample::{AgentSample, RagSample};
pub use score::Score;
pub use tool_call::{ToolCallAccuracy, ToolCallF1};
pub use topic::{TopicAdherence, TopicAdherenceMode};
