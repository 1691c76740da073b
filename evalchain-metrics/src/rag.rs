use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use evalchain_core::ChatModel;

use crate::judge::judge_json;
use crate::{MetricError, RagSample, Score};

const RAG_JUDGE_SYSTEM: &str = "You evaluate retrieval-augmented answers. \
Answer with JSON only, no prose around it.";

#[async_trait]
pub trait RagMetric: Send + Sync {
    fn name(&self) -> &'static str;
    async fn score(&self, sample: &RagSample) -> Result<Score, MetricError>;
}

/// Mean score of each metric across the sample set, in metric order.
pub async fn evaluate(
    samples: &[RagSample],
    metrics: &[Box<dyn RagMetric>],
) -> Result<Vec<(String, f64)>, MetricError> {
    let mut means = Vec::with_capacity(metrics.len());
    for metric in metrics {
        let mut total = 0.0;
        for sample in samples {
            total += metric.score(sample).await?.value;
        }
        let mean = if samples.is_empty() {
            0.0
        } else {
            total / samples.len() as f64
        };
        tracing::debug!(metric = metric.name(), mean, "metric evaluated");
        means.push((metric.name().to_string(), mean));
    }
    Ok(means)
}

fn joined_contexts(sample: &RagSample) -> String {
    sample
        .contexts
        .iter()
        .enumerate()
        .map(|(idx, context)| format!("[{idx}] {context}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn ground_truth(sample: &RagSample) -> Result<&str, MetricError> {
    sample
        .ground_truth
        .as_deref()
        .ok_or(MetricError::MissingReference("ground_truth"))
}

/// Fraction of the answer's claims supported by the retrieved contexts.
pub struct Faithfulness {
    judge: Arc<dyn ChatModel>,
}

#[derive(Deserialize)]
struct ClaimVerdict {
    claims: Vec<Claim>,
}

#[derive(Deserialize)]
struct Claim {
    #[allow(dead_code)]
    claim: String,
    supported: bool,
}

impl Faithfulness {
    pub fn new(judge: Arc<dyn ChatModel>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl RagMetric for Faithfulness {
    fn name(&self) -> &'static str {
        "faithfulness"
    }

    async fn score(&self, sample: &RagSample) -> Result<Score, MetricError> {
        let prompt = format!(
            r#"CONTEXT:
{contexts}

ANSWER:
{answer}

Extract every factual claim from the answer and verify each against the
context.

Respond in JSON:
{{"claims": [{{"claim": "...", "supported": <boolean>}}, ...]}}"#,
            contexts = joined_contexts(sample),
            answer = sample.answer,
        );

        let verdict: ClaimVerdict = judge_json(&self.judge, RAG_JUDGE_SYSTEM, prompt).await?;
        if verdict.claims.is_empty() {
            return Ok(Score::of(1.0));
        }
        let supported = verdict.claims.iter().filter(|claim| claim.supported).count();
        Ok(Score::of(supported as f64 / verdict.claims.len() as f64))
    }
}

/// Does the answer address the question.
pub struct AnswerRelevancy {
    judge: Arc<dyn ChatModel>,
}

#[derive(Deserialize)]
struct RelevanceVerdict {
    relevance_score: f64,
    #[serde(default)]
    reasoning: Option<String>,
}

impl AnswerRelevancy {
    pub fn new(judge: Arc<dyn ChatModel>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl RagMetric for AnswerRelevancy {
    fn name(&self) -> &'static str {
        "answer_relevancy"
    }

    async fn score(&self, sample: &RagSample) -> Result<Score, MetricError> {
        let prompt = format!(
            r#"QUESTION:
{question}

ANSWER:
{answer}

How relevant is the answer to the question? Penalize answers that are
incomplete or carry unrelated information.

Respond in JSON:
{{"relevance_score": <float 0-1>, "reasoning": "<one sentence>"}}"#,
            question = sample.question,
            answer = sample.answer,
        );

        let verdict: RelevanceVerdict = judge_json(&self.judge, RAG_JUDGE_SYSTEM, prompt).await?;
        let value = verdict.relevance_score.clamp(0.0, 1.0);
        Ok(match verdict.reasoning {
            Some(reasoning) => Score::with_reason(value, reasoning),
            None => Score::of(value),
        })
    }
}

/// Fraction of retrieved contexts that were relevant to producing the
/// ground-truth answer.
pub struct ContextPrecision {
    judge: Arc<dyn ChatModel>,
}

#[derive(Deserialize)]
struct ContextRelevanceVerdict {
    context_relevance: Vec<ContextRelevance>,
}

#[derive(Deserialize)]
struct ContextRelevance {
    #[allow(dead_code)]
    chunk_index: usize,
    is_relevant: bool,
}

impl ContextPrecision {
    pub fn new(judge: Arc<dyn ChatModel>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl RagMetric for ContextPrecision {
    fn name(&self) -> &'static str {
        "context_precision"
    }

    async fn score(&self, sample: &RagSample) -> Result<Score, MetricError> {
        let reference = ground_truth(sample)?;
        if sample.contexts.is_empty() {
            return Ok(Score::with_reason(0.0, "no contexts retrieved"));
        }

        let prompt = format!(
            r#"QUESTION:
{question}

GROUND TRUTH ANSWER:
{reference}

RETRIEVED CONTEXT (in order):
{contexts}

For each context chunk, decide whether it is relevant for arriving at the
ground truth answer.

Respond in JSON:
{{"context_relevance": [{{"chunk_index": 0, "is_relevant": <boolean>}}, ...]}}"#,
            question = sample.question,
            contexts = joined_contexts(sample),
        );

        let verdict: ContextRelevanceVerdict =
            judge_json(&self.judge, RAG_JUDGE_SYSTEM, prompt).await?;
        let relevant = verdict
            .context_relevance
            .iter()
            .filter(|entry| entry.is_relevant)
            .count()
            .min(sample.contexts.len());
        Ok(Score::of(relevant as f64 / sample.contexts.len() as f64))
    }
}

/// Is the ground-truth answer attributable to the retrieved contexts.
pub struct ContextRecall {
    judge: Arc<dyn ChatModel>,
}

#[derive(Deserialize)]
struct AttributionVerdict {
    statements: Vec<Attribution>,
}

#[derive(Deserialize)]
struct Attribution {
    #[allow(dead_code)]
    statement: String,
    attributable: bool,
}

impl ContextRecall {
    pub fn new(judge: Arc<dyn ChatModel>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl RagMetric for ContextRecall {
    fn name(&self) -> &'static str {
        "context_recall"
    }

    async fn score(&self, sample: &RagSample) -> Result<Score, MetricError> {
        let reference = ground_truth(sample)?;

        let prompt = format!(
            r#"GROUND TRUTH ANSWER:
{reference}

RETRIEVED CONTEXT:
{contexts}

Break the ground truth answer into statements and decide, for each, whether
it can be attributed to the retrieved context.

Respond in JSON:
{{"statements": [{{"statement": "...", "attributable": <boolean>}}, ...]}}"#,
            contexts = joined_contexts(sample),
        );

        let verdict: AttributionVerdict =
            judge_json(&self.judge, RAG_JUDGE_SYSTEM, prompt).await?;
        if verdict.statements.is_empty() {
            return Ok(Score::of(1.0));
        }
        let attributable = verdict
            .statements
            .iter()
            .filter(|statement| statement.attributable)
            .count();
        Ok(Score::of(
            attributable as f64 / verdict.statements.len() as f64,
        ))
    }
}
