mod chain;
mod document;
mod embedding;
mod error;
mod llm;
mod runnable;
mod trajectory;
mod value;
mod vector_store;

pub use chain::{Chain, RunnableExt};
pub use document::Document;
pub use embedding::Embedding;
pub use error::{EmbeddingError, EvalchainError, StoreError};
pub use llm::{ChatModel, ChatRequest, ChatResponse, Message, Role, ToolCall};
pub use runnable::Runnable;
pub use trajectory::Trajectory;
pub use value::{IntoValue, TryFromValue, Value};
pub use vector_store::{SearchResult, VectorStore};
