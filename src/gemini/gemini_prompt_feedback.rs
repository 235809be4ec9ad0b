use serde::{Deserialize, Serialize};

/// Returned with HTTP 200 when the prompt itself was rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(rename = "blockReasonMessage")]
    #[serde(default)]
    pub block_reason_message: Option<String>,
}
