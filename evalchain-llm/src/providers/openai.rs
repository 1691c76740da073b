use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
    Role as OpenAiRole,
};
use async_openai::Client;

use evalchain_core::{
    ChatModel, ChatRequest, ChatResponse, EvalchainError, Message, Role as CoreRole,
};

/// OpenAI chat client. `new` picks up the `OPENAI_API_KEY` environment
/// credential through the default client config.
#[derive(Clone)]
pub struct OpenAiChat {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChat {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
        }
    }

    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let config = OpenAIConfig::default().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }
}

fn map_message(message: Message) -> Result<ChatCompletionRequestMessage, EvalchainError> {
    match message.role {
        CoreRole::System => Ok(ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage {
                content: message.content,
                role: OpenAiRole::System,
                name: None,
            },
        )),
        CoreRole::User => Ok(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(message.content),
                role: OpenAiRole::User,
                name: None,
            },
        )),
        CoreRole::Assistant => {
            let content = if message.content.is_empty() {
                None
            } else {
                Some(message.content)
            };
            Ok(ChatCompletionRequestMessage::Assistant(
                ChatCompletionRequestAssistantMessage {
                    content,
                    role: OpenAiRole::Assistant,
                    name: None,
                    tool_calls: None,
                    ..Default::default()
                },
            ))
        }
        CoreRole::Tool => Err(EvalchainError::InvalidConfig(
            "tool turns cannot be sent to the provider; render trajectories to a transcript"
                .to_string(),
        )),
    }
}

#[async_trait::async_trait]
impl ChatModel for OpenAiChat {
    async fn invoke(&self, request: ChatRequest) -> Result<ChatResponse, EvalchainError> {
        let messages = request
            .messages
            .into_iter()
            .map(map_message)
            .collect::<Result<Vec<_>, _>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|err| EvalchainError::LlmProvider(err.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|err| EvalchainError::LlmProvider(err.to_string()))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| EvalchainError::LlmProvider("no choices returned".to_string()))?;
        let content = choice.message.content.clone().unwrap_or_default();

        Ok(ChatResponse { content })
    }
}
