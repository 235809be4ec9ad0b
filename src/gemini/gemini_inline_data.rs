use serde::{Deserialize, Serialize};

/// Raw binary content (here, image bytes) carried inline as base64.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}
