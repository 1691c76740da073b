use std::collections::HashMap;

use evalchain_core::{Document, Embedding, VectorStore};
use evalchain_retrieval::{HashEmbedder, InMemoryVectorStore, Retriever};

#[tokio::test]
async fn retriever_finds_exact_match_first() {
    let embedder = HashEmbedder::new(16);
    let store = InMemoryVectorStore::new();

    let contents = [
        "The Dartmouth Conference in 1956 marked the birth of AI.",
        "Banks use AI for fraud detection and credit scoring.",
        "Edge AI runs smaller models on device.",
    ];
    let mut docs = Vec::new();
    for (idx, content) in contents.iter().enumerate() {
        let embedding = embedder.embed(content).await.expect("embed");
        docs.push(Document {
            id: format!("doc-{idx}"),
            content: content.to_string(),
            metadata: HashMap::new(),
            embedding: Some(embedding),
        });
    }
    store.add(docs).await.expect("add");

    let retriever = Retriever::new(embedder, store);
    let results = retriever
        .retrieve("Banks use AI for fraud detection and credit scoring.", 2)
        .await
        .expect("retrieve");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document.id, "doc-1");
    assert!((results[0].score - 1.0).abs() < 1e-5);
}
