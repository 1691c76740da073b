use std::sync::Arc;

use serde::Deserialize;
use evalchain_core::ChatModel;

use crate::judge::judge_json;
use crate::{AgentSample, MetricError, Score};

const TOPIC_JUDGE_SYSTEM: &str = "You classify which topics an assistant \
engaged with in a conversation. Answer with JSON only, no prose around it.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopicAdherenceMode {
    Precision,
    Recall,
    F1,
}

#[derive(Deserialize)]
struct TopicVerdict {
    discussed_topics: Vec<String>,
    within_reference: Vec<String>,
    reference_topics_addressed: Vec<String>,
}

/// Judges which topics the assistant engaged with, then combines the
/// verdicts deterministically: precision is the share of engaged topics
/// inside the allowed set, recall the share of allowed topics engaged.
pub struct TopicAdherence {
    judge: Arc<dyn ChatModel>,
    mode: TopicAdherenceMode,
}

impl TopicAdherence {
    pub fn new(judge: Arc<dyn ChatModel>, mode: TopicAdherenceMode) -> Self {
        Self { judge, mode }
    }

    pub async fn score(&self, sample: &AgentSample) -> Result<Score, MetricError> {
        if sample.trajectory.is_empty() {
            return Err(MetricError::EmptyTrajectory);
        }
        let topics = sample
            .reference_topics
            .as_deref()
            .filter(|topics| !topics.is_empty())
            .ok_or(MetricError::MissingReference("reference_topics"))?;

        let prompt = format!(
            r#"Conversation:
{transcript}

Allowed topics:
{topics}

List the topics the assistant actually engaged with (answered, looked up, or
elaborated on - a refusal to engage does not count). Then report which of
those fall within the allowed topics, and which allowed topics the assistant
engaged with.

Respond in JSON:
{{"discussed_topics": ["..."], "within_reference": ["..."], "reference_topics_addressed": ["..."]}}"#,
            transcript = sample.trajectory.transcript(),
            topics = topics.join(", "),
        );

        let verdict: TopicVerdict = judge_json(&self.judge, TOPIC_JUDGE_SYSTEM, prompt).await?;

        let discussed = verdict.discussed_topics.len();
        let within = verdict.within_reference.len().min(discussed);
        let addressed = verdict.reference_topics_addressed.len().min(topics.len());

        let precision = if discussed == 0 {
            0.0
        } else {
            within as f64 / discussed as f64
        };
        let recall = addressed as f64 / topics.len() as f64;

        let value = match self.mode {
            TopicAdherenceMode::Precision => precision,
            TopicAdherenceMode::Recall => recall,
            TopicAdherenceMode::F1 => {
                if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                }
            }
        };
        Ok(Score::of(value))
    }
}
