use std::sync::Arc;

use anyhow::Result;

use evalchain_core::ChatModel;
use evalchain_embeddings::OpenAiEmbedding;
use evalchain_llm::OpenAiChat;
use evalchain_metrics::{
    evaluate, AnswerRelevancy, ContextPrecision, ContextRecall, Faithfulness, RagMetric,
    RagSample,
};
use evalchain_rag::RagPipeline;
use evalchain_retrieval::RecursiveCharacterTextSplitter;

const QUESTIONS: [&str; 5] = [
    "When did modern Artificial Intelligence research begin and what event marked its formal birth?",
    "What are the main advantages and disadvantages of Artificial Intelligence?",
    "How is Artificial Intelligence used in the banking sector?",
    "What role does data play in the success of modern AI systems?",
    "What are the upcoming major trends in Artificial Intelligence?",
];

const GROUND_TRUTHS: [&str; 5] = [
    "Modern AI research began in the 1950s, and the Dartmouth Conference in 1956 marked the \
     formal birth of Artificial Intelligence as a field.",
    "AI offers advantages such as automation, improved productivity, accuracy, and continuous \
     operation, but it also has disadvantages including job displacement, bias, lack of \
     transparency, high computational cost, and ethical concerns.",
    "In banking, AI is used for fraud detection, transaction monitoring, credit scoring, loan \
     approvals, risk assessment, chatbots, algorithmic trading, biometric security, regulatory \
     compliance, and personalized financial services.",
    "Data is critical to modern AI systems because machine learning models rely on large, \
     high-quality datasets to learn patterns, make predictions, and improve accuracy, while \
     biased or poor data leads to biased outcomes.",
    "Upcoming AI trends include Generative AI, Large Language Models, multimodal AI, AI agents, \
     autonomous systems, Edge AI, smaller efficient models, AI safety research, explainable AI, \
     and evolving regulatory frameworks.",
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let judge: Arc<dyn ChatModel> = Arc::new(OpenAiChat::new("gpt-4o-mini"));

    let pipeline = RagPipeline::builder()
        .with_source("input.txt")
        .with_splitter(RecursiveCharacterTextSplitter::new(500, 50)?)
        .with_embedder(Arc::new(OpenAiEmbedding::new("text-embedding-3-small", 1536)))
        .with_chat_model(Arc::new(OpenAiChat::new("gpt-4o")))
        .build()?;

    let chunks = pipeline.ingest().await?;
    println!("Indexed {chunks} chunks from input.txt");

    let mut samples = Vec::with_capacity(QUESTIONS.len());
    for (question, ground_truth) in QUESTIONS.iter().zip(GROUND_TRUTHS) {
        let answer = pipeline.ask(question).await?;
        println!("\nQ: {question}");
        println!("A: {}", answer.answer);
        samples.push(RagSample {
            question: question.to_string(),
            answer: answer.answer,
            contexts: answer.contexts,
            ground_truth: Some(ground_truth.to_string()),
        });
    }

    let metrics: Vec<Box<dyn RagMetric>> = vec![
        Box::new(Faithfulness::new(judge.clone())),
        Box::new(AnswerRelevancy::new(judge.clone())),
        Box::new(ContextPrecision::new(judge.clone())),
        Box::new(ContextRecall::new(judge)),
    ];
    let report = evaluate(&samples, &metrics).await?;

    println!("\nRAG evaluation results:");
    for (name, mean) in report {
        println!("{name}: {mean:.3}");
    }

    Ok(())
}
