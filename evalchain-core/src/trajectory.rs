use serde::{Deserialize, Serialize};

use crate::{Message, Role, ToolCall};

/// Ordered sequence of conversation turns produced by one agent run.
/// Append-only while being built; scorers only ever borrow it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Trajectory {
    messages: Vec<Message>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Tool invocations issued by assistant turns, flattened in trajectory
    /// order. Ordering within a single turn is the order of the request list.
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.messages
            .iter()
            .filter(|message| message.role == Role::Assistant)
            .flat_map(|message| message.tool_calls.iter())
            .collect()
    }

    /// Plain-text rendering handed to LLM judges.
    pub fn transcript(&self) -> String {
        let mut lines = Vec::with_capacity(self.messages.len());
        for message in &self.messages {
            let role = match message.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
                Role::Tool => "tool",
            };
            let mut line = format!("{role}: {}", message.content);
            for call in &message.tool_calls {
                line.push_str(&format!("\n  [tool call] {}({})", call.name, call.args));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl From<Vec<Message>> for Trajectory {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
