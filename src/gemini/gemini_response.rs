use crate::gemini::{GeminiCandidate, GeminiPromptFeedback};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GeminiPart;

    #[test]
    fn test_deserializes_inline_image_response() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "AAA=" } }
                    ]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.candidates.len(), 1);
        let content = response.candidates[0].content.as_ref().unwrap();
        assert_eq!(content.parts.len(), 2);
        assert!(matches!(
            &content.parts[1],
            GeminiPart::InlineData { inline_data } if inline_data.data == "AAA="
        ));
    }

    #[test]
    fn test_deserializes_empty_body() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
        assert!(response.prompt_feedback.is_none());
    }

    #[test]
    fn test_deserializes_blocked_prompt() {
        let json = r#"{
            "candidates": [],
            "promptFeedback": {
                "blockReason": "SAFETY",
                "blockReasonMessage": "Prompt was blocked"
            }
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let feedback = response.prompt_feedback.unwrap();
        assert_eq!(feedback.block_reason.as_deref(), Some("SAFETY"));
        assert_eq!(feedback.block_reason_message.as_deref(), Some("Prompt was blocked"));
    }

    #[test]
    fn test_deserializes_candidate_without_content() {
        let json = r#"{ "candidates": [{ "finishReason": "IMAGE_SAFETY" }] }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.candidates[0].content.is_none());
        assert_eq!(
            response.candidates[0].finish_reason.as_deref(),
            Some("IMAGE_SAFETY")
        );
    }
}
