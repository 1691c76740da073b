use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use evalchain_core::{
    ChatModel, ChatRequest, Embedding, EvalchainError, Message, Runnable, RunnableExt, Value,
    VectorStore,
};
use evalchain_prompt::PromptTemplate;
use evalchain_retrieval::{
    IngestionError, InMemoryVectorStore, RecursiveCharacterTextSplitter, RetrievalError,
    TextLoader,
};

const QA_TEMPLATE: &str = "You are an assistant for question answering tasks.
Use the following retrieved context to answer the question.
If you don't know the answer, say you don't know.
Use two sentences maximum and keep the answer concise.

Question: {{question}}
Context: {{context}}";

#[derive(Debug, thiserror::Error)]
pub enum RagError {
    #[error("pipeline is missing {0}")]
    MissingComponent(&'static str),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("ingestion failed: {0}")]
    Ingestion(#[from] IngestionError),
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),
    #[error("generation failed: {0}")]
    Generation(#[from] EvalchainError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RagAnswer {
    pub answer: String,
    pub contexts: Vec<String>,
}

struct PromptNode {
    template: PromptTemplate,
}

#[async_trait::async_trait]
impl Runnable<HashMap<String, Value>, String> for PromptNode {
    async fn invoke(&self, input: HashMap<String, Value>) -> Result<String, EvalchainError> {
        Ok(self.template.render(&input))
    }
}

struct GenerateNode {
    model: Arc<dyn ChatModel>,
}

#[async_trait::async_trait]
impl Runnable<String, String> for GenerateNode {
    async fn invoke(&self, input: String) -> Result<String, EvalchainError> {
        let response = self
            .model
            .invoke(ChatRequest::new(vec![Message::human(input)]))
            .await?;
        Ok(response.content)
    }
}

/// Loads one text source into a vector store, then answers questions from
/// it, reporting the context passages each answer drew on.
pub struct RagPipeline {
    source: PathBuf,
    splitter: RecursiveCharacterTextSplitter,
    embedder: Arc<dyn Embedding>,
    store: Arc<dyn VectorStore>,
    model: Arc<dyn ChatModel>,
    prompt: PromptTemplate,
    top_k: usize,
}

pub struct RagPipelineBuilder {
    source: Option<PathBuf>,
    splitter: Option<RecursiveCharacterTextSplitter>,
    embedder: Option<Arc<dyn Embedding>>,
    store: Option<Arc<dyn VectorStore>>,
    model: Option<Arc<dyn ChatModel>>,
    prompt: Option<PromptTemplate>,
    top_k: usize,
}

impl RagPipeline {
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder {
            source: None,
            splitter: None,
            embedder: None,
            store: None,
            model: None,
            prompt: None,
            top_k: 4,
        }
    }

    /// Splits the source file and indexes every chunk. Returns the number of
    /// chunks indexed.
    pub async fn ingest(&self) -> Result<usize, RagError> {
        let documents = TextLoader::new(self.source.clone())
            .load()
            .map_err(IngestionError::Io)?;
        let mut chunks = self.splitter.split_documents(&documents);

        let contents: Vec<String> = chunks.iter().map(|doc| doc.content.clone()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&contents)
            .await
            .map_err(IngestionError::Embedding)?;
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = Some(embedding);
        }

        let count = chunks.len();
        self.store.add(chunks).await.map_err(IngestionError::Store)?;
        tracing::info!(chunks = count, source = %self.source.display(), "ingested source");
        Ok(count)
    }

    pub async fn ask(&self, question: &str) -> Result<RagAnswer, RagError> {
        let contexts = self.retrieve_contexts(question).await?;

        let mut vars = HashMap::new();
        vars.insert("question".to_string(), Value::String(question.to_string()));
        vars.insert(
            "context".to_string(),
            Value::String(contexts.join("\n\n")),
        );

        let chain = PromptNode {
            template: self.prompt.clone(),
        }
        .then(GenerateNode {
            model: self.model.clone(),
        });
        let answer = chain.invoke(vars).await?;
        tracing::debug!(question, contexts = contexts.len(), "answered question");

        Ok(RagAnswer { answer, contexts })
    }

    async fn retrieve_contexts(&self, question: &str) -> Result<Vec<String>, RagError> {
        let embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(RetrievalError::Embedding)?;
        let results = self
            .store
            .search(&embedding, self.top_k)
            .await
            .map_err(RetrievalError::Store)?;
        Ok(results
            .into_iter()
            .map(|result| result.document.content)
            .collect())
    }
}

impl RagPipelineBuilder {
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn with_splitter(mut self, splitter: RecursiveCharacterTextSplitter) -> Self {
        self.splitter = Some(splitter);
        self
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedding>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn with_vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = Some(prompt);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        if top_k > 0 {
            self.top_k = top_k;
        }
        self
    }

    pub fn build(self) -> Result<RagPipeline, RagError> {
        let splitter = match self.splitter {
            Some(splitter) => splitter,
            None => RecursiveCharacterTextSplitter::new(500, 50)
                .map_err(|err| RagError::Config(err.to_string()))?,
        };
        Ok(RagPipeline {
            source: self.source.ok_or(RagError::MissingComponent("source"))?,
            splitter,
            embedder: self
                .embedder
                .ok_or(RagError::MissingComponent("embedder"))?,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemoryVectorStore::new())),
            model: self.model.ok_or(RagError::MissingComponent("chat model"))?,
            prompt: self
                .prompt
                .unwrap_or_else(|| PromptTemplate::new(QA_TEMPLATE)),
            top_k: self.top_k,
        })
    }
}
