use serde::{Deserialize, Serialize};

/// Outcome of one metric over one sample, always in `[0, 1]`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Score {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Score {
    pub fn of(value: f64) -> Self {
        Self {
            value,
            reason: None,
        }
    }

    pub fn with_reason(value: f64, reason: impl Into<String>) -> Self {
        Self {
            value,
            reason: Some(reason.into()),
        }
    }
}
