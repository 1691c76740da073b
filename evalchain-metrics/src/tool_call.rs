use evalchain_core::ToolCall;

use crate::{AgentSample, MetricError, Score};

/// Compares the tool invocations issued by assistant turns against the
/// reference list. 1.0 means every reference call was matched with no
/// extras. Relaxed order pairs greedily: each candidate call, in trajectory
/// order, consumes the first not-yet-consumed reference call it exactly
/// matches.
#[derive(Clone, Debug, Default)]
pub struct ToolCallAccuracy {
    strict_order: bool,
}

impl ToolCallAccuracy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_order(mut self, strict: bool) -> Self {
        self.strict_order = strict;
        self
    }

    pub fn score(&self, sample: &AgentSample) -> Result<Score, MetricError> {
        let (candidate, reference) = candidate_and_reference(sample)?;

        let matched = if self.strict_order {
            candidate
                .iter()
                .zip(reference.iter())
                .filter(|(call, expected)| ***call == **expected)
                .count()
        } else {
            match_relaxed(&candidate, reference)
        };

        let denominator = usize::max(candidate.len(), reference.len());
        if denominator == 0 {
            return Ok(Score::of(1.0));
        }
        Ok(Score::of(matched as f64 / denominator as f64))
    }
}

/// Order-independent precision/recall over matched invocations, reported as
/// their harmonic mean.
#[derive(Clone, Debug, Default)]
pub struct ToolCallF1;

impl ToolCallF1 {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, sample: &AgentSample) -> Result<Score, MetricError> {
        let (candidate, reference) = candidate_and_reference(sample)?;

        if candidate.is_empty() && reference.is_empty() {
            return Ok(Score::of(1.0));
        }

        let matched = match_relaxed(&candidate, reference) as f64;
        let precision = if candidate.is_empty() {
            0.0
        } else {
            matched / candidate.len() as f64
        };
        let recall = if reference.is_empty() {
            0.0
        } else {
            matched / reference.len() as f64
        };

        if precision + recall == 0.0 {
            return Ok(Score::of(0.0));
        }
        Ok(Score::of(
            2.0 * precision * recall / (precision + recall),
        ))
    }
}

fn candidate_and_reference<'a>(
    sample: &'a AgentSample,
) -> Result<(Vec<&'a ToolCall>, &'a [ToolCall]), MetricError> {
    if sample.trajectory.is_empty() {
        return Err(MetricError::EmptyTrajectory);
    }
    let reference = sample
        .reference_tool_calls
        .as_deref()
        .ok_or(MetricError::MissingReference("reference_tool_calls"))?;
    Ok((sample.trajectory.tool_calls(), reference))
}

fn match_relaxed(candidate: &[&ToolCall], reference: &[ToolCall]) -> usize {
    let mut consumed = vec![false; reference.len()];
    let mut matched = 0usize;
    for call in candidate {
        let pair = reference
            .iter()
            .enumerate()
            .find(|(idx, expected)| !consumed[*idx] && **expected == **call);
        if let Some((idx, _)) = pair {
            consumed[idx] = true;
            matched += 1;
        }
    }
    matched
}
