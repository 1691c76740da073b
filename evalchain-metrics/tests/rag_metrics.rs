use std::sync::Arc;

use evalchain_core::{ChatModel, ChatRequest, ChatResponse, EvalchainError};
use evalchain_metrics::{
    evaluate, AnswerRelevancy, ContextPrecision, ContextRecall, Faithfulness, MetricError,
    RagMetric, RagSample,
};

struct CannedJudge {
    reply: &'static str,
}

#[async_trait::async_trait]
impl ChatModel for CannedJudge {
    async fn invoke(&self, _request: ChatRequest) -> Result<ChatResponse, EvalchainError> {
        Ok(ChatResponse {
            content: self.reply.to_string(),
        })
    }
}

fn ai_sample() -> RagSample {
    RagSample {
        question: "When did modern AI research begin?".to_string(),
        answer: "Modern AI research began in the 1950s. The Dartmouth Conference in 1956 marked \
                 its formal birth."
            .to_string(),
        contexts: vec![
            "AI research started in the 1950s.".to_string(),
            "The Dartmouth Conference took place in 1956.".to_string(),
        ],
        ground_truth: Some(
            "Modern AI research began in the 1950s, and the Dartmouth Conference in 1956 marked \
             the formal birth of the field."
                .to_string(),
        ),
    }
}

#[tokio::test]
async fn faithfulness_is_the_fraction_of_supported_claims() {
    let judge = Arc::new(CannedJudge {
        reply: r#"{"claims": [
            {"claim": "research began in the 1950s", "supported": true},
            {"claim": "Dartmouth was in 1956", "supported": true},
            {"claim": "Dartmouth was in Hanover", "supported": false},
            {"claim": "AI stands for artificial intelligence", "supported": false}
        ]}"#,
    });

    let score = Faithfulness::new(judge)
        .score(&ai_sample())
        .await
        .expect("score");

    assert_eq!(score.value, 0.5);
}

#[tokio::test]
async fn answer_relevancy_clamps_judge_scores() {
    let judge = Arc::new(CannedJudge {
        reply: r#"{"relevance_score": 1.4, "reasoning": "directly answers the question"}"#,
    });

    let score = AnswerRelevancy::new(judge)
        .score(&ai_sample())
        .await
        .expect("score");

    assert_eq!(score.value, 1.0);
    assert!(score.reason.is_some());
}

#[tokio::test]
async fn context_precision_counts_relevant_chunks() {
    let judge = Arc::new(CannedJudge {
        reply: r#"{"context_relevance": [
            {"chunk_index": 0, "is_relevant": true},
            {"chunk_index": 1, "is_relevant": false}
        ]}"#,
    });

    let score = ContextPrecision::new(judge)
        .score(&ai_sample())
        .await
        .expect("score");

    assert_eq!(score.value, 0.5);
}

#[tokio::test]
async fn context_precision_requires_ground_truth() {
    let judge = Arc::new(CannedJudge {
        reply: r#"{"context_relevance": []}"#,
    });
    let mut sample = ai_sample();
    sample.ground_truth = None;

    let result = ContextPrecision::new(judge).score(&sample).await;

    assert!(matches!(
        result,
        Err(MetricError::MissingReference("ground_truth"))
    ));
}

#[tokio::test]
async fn context_recall_is_the_fraction_of_attributable_statements() {
    let judge = Arc::new(CannedJudge {
        reply: r#"{"statements": [
            {"statement": "research began in the 1950s", "attributable": true},
            {"statement": "Dartmouth 1956 marked the formal birth", "attributable": true},
            {"statement": "the field grew quickly", "attributable": false}
        ]}"#,
    });

    let score = ContextRecall::new(judge)
        .score(&ai_sample())
        .await
        .expect("score");

    assert!((score.value - 2.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn evaluate_reports_means_per_metric_in_order() {
    let judge: Arc<dyn ChatModel> = Arc::new(CannedJudge {
        reply: r#"{"claims": [
            {"claim": "a", "supported": true},
            {"claim": "b", "supported": false}
        ]}"#,
    });
    let samples = vec![ai_sample(), ai_sample()];
    let metrics: Vec<Box<dyn RagMetric>> = vec![Box::new(Faithfulness::new(judge))];

    let report = evaluate(&samples, &metrics).await.expect("evaluate");

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].0, "faithfulness");
    assert_eq!(report[0].1, 0.5);
}
