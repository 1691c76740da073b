pub mod providers;

pub use evalchain_core::{ChatModel, ChatRequest, ChatResponse, Message, Role};

#[cfg(feature = "openai")]
pub use providers::openai::OpenAiChat;
