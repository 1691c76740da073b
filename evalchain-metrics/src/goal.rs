use std::sync::Arc;

use serde::Deserialize;
use evalchain_core::ChatModel;

use crate::judge::judge_json;
use crate::{AgentSample, MetricError, Score};

const GOAL_JUDGE_SYSTEM: &str = "You judge whether an agent conversation \
achieved its goal. Answer with JSON only, no prose around it.";

#[derive(Deserialize)]
struct GoalVerdict {
    achieved: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// Asks the judge whether the conversation's end state satisfies a stated
/// reference goal. Binary outcome.
pub struct AgentGoalAccuracyWithReference {
    judge: Arc<dyn ChatModel>,
}

impl AgentGoalAccuracyWithReference {
    pub fn new(judge: Arc<dyn ChatModel>) -> Self {
        Self { judge }
    }

    pub async fn score(&self, sample: &AgentSample) -> Result<Score, MetricError> {
        if sample.trajectory.is_empty() {
            return Err(MetricError::EmptyTrajectory);
        }
        let goal = sample
            .reference_goal
            .as_deref()
            .ok_or(MetricError::MissingReference("reference_goal"))?;

        let prompt = format!(
            r#"Conversation:
{transcript}

Stated goal:
{goal}

Did the conversation end with this goal achieved?

Respond in JSON:
{{"achieved": <boolean>, "reason": "<one sentence>"}}"#,
            transcript = sample.trajectory.transcript(),
        );

        let verdict: GoalVerdict = judge_json(&self.judge, GOAL_JUDGE_SYSTEM, prompt).await?;
        Ok(verdict_to_score(verdict))
    }
}

/// Same judgment without a stated goal: the judge first infers what the user
/// wanted from the conversation alone, then decides whether it happened.
/// A conversation with no discernible resolution scores 0.0, it is not an
/// error.
pub struct AgentGoalAccuracyWithoutReference {
    judge: Arc<dyn ChatModel>,
}

impl AgentGoalAccuracyWithoutReference {
    pub fn new(judge: Arc<dyn ChatModel>) -> Self {
        Self { judge }
    }

    pub async fn score(&self, sample: &AgentSample) -> Result<Score, MetricError> {
        if sample.trajectory.is_empty() {
            return Err(MetricError::EmptyTrajectory);
        }

        let prompt = format!(
            r#"Conversation:
{transcript}

First infer what the user wanted from this conversation. Then decide whether
the conversation ended with that achieved. If no goal is discernible or
nothing was resolved, answer achieved = false.

Respond in JSON:
{{"inferred_goal": "<short phrase>", "achieved": <boolean>, "reason": "<one sentence>"}}"#,
            transcript = sample.trajectory.transcript(),
        );

        let verdict: GoalVerdict = judge_json(&self.judge, GOAL_JUDGE_SYSTEM, prompt).await?;
        Ok(verdict_to_score(verdict))
    }
}

fn verdict_to_score(verdict: GoalVerdict) -> Score {
    let value = if verdict.achieved { 1.0 } else { 0.0 };
    match verdict.reason {
        Some(reason) => Score::with_reason(value, reason),
        None => Score::of(value),
    }
}
