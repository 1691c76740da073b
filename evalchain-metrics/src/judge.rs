use std::sync::Arc;

use serde::de::DeserializeOwned;
use evalchain_core::{ChatModel, ChatRequest, Message};

use crate::MetricError;

/// Sends one system+user exchange to the judge and parses its reply as JSON.
pub(crate) async fn judge_json<T: DeserializeOwned>(
    judge: &Arc<dyn ChatModel>,
    system: &str,
    user: String,
) -> Result<T, MetricError> {
    let request = ChatRequest::new(vec![Message::system(system), Message::human(user)]);
    let response = judge.invoke(request).await?;
    tracing::debug!(raw = %response.content, "judge verdict received");
    parse_verdict(&response.content)
}

pub(crate) fn parse_verdict<T: DeserializeOwned>(content: &str) -> Result<T, MetricError> {
    serde_json::from_str(strip_code_fences(content)).map_err(|err| MetricError::Verdict {
        output: content.to_string(),
        reason: err.to_string(),
    })
}

// Judges are instructed to answer with bare JSON but often wrap it anyway.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}
