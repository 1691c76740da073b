use std::collections::HashMap;

use evalchain_core::{Document, StoreError, VectorStore};
use evalchain_retrieval::InMemoryVectorStore;

fn doc(id: &str, content: &str, embedding: Vec<f32>) -> Document {
    Document {
        id: id.to_string(),
        content: content.to_string(),
        metadata: HashMap::new(),
        embedding: Some(embedding),
    }
}

#[tokio::test]
async fn search_returns_most_similar_first() {
    let store = InMemoryVectorStore::new();
    store
        .add(vec![
            doc("a", "about cats", vec![1.0, 0.0]),
            doc("b", "about dogs", vec![0.0, 1.0]),
        ])
        .await
        .expect("add");

    let results = store.search(&[1.0, 0.1], 2).await.expect("search");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document.id, "a");
    assert!(results[0].score > results[1].score);
    assert!(results[0].document.embedding.is_none());
}

#[tokio::test]
async fn add_rejects_missing_embedding_and_mismatched_dimension() {
    let store = InMemoryVectorStore::new();

    let missing = store
        .add(vec![Document {
            id: "no-embedding".to_string(),
            content: "text".to_string(),
            metadata: HashMap::new(),
            embedding: None,
        }])
        .await;
    assert!(matches!(missing, Err(StoreError::MissingEmbedding(_))));

    store
        .add(vec![doc("a", "first", vec![1.0, 0.0])])
        .await
        .expect("add");
    let mismatched = store.add(vec![doc("b", "second", vec![1.0, 0.0, 0.0])]).await;
    assert!(matches!(
        mismatched,
        Err(StoreError::DimensionMismatch { expected: 2, got: 3 })
    ));
}

#[tokio::test]
async fn add_upserts_by_id() {
    let store = InMemoryVectorStore::new();
    store
        .add(vec![doc("a", "old content", vec![1.0, 0.0])])
        .await
        .expect("add");
    store
        .add(vec![doc("a", "new content", vec![0.0, 1.0])])
        .await
        .expect("upsert");

    let results = store.search(&[0.0, 1.0], 10).await.expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.content, "new content");
}

#[tokio::test]
async fn delete_removes_documents() {
    let store = InMemoryVectorStore::new();
    store
        .add(vec![
            doc("a", "keep", vec![1.0, 0.0]),
            doc("b", "drop", vec![0.0, 1.0]),
        ])
        .await
        .expect("add");

    store.delete(&["b".to_string()]).await.expect("delete");
    let results = store.search(&[0.0, 1.0], 10).await.expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.id, "a");
}
