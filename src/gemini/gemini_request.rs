use crate::gemini::{
    GeminiContent, GeminiGenerationConfig, GeminiInlineData, GeminiPart,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

impl GeminiRequest {
    /// Single multimodal request: the uploaded image followed by the final
    /// prompt text, asking for image output back.
    pub fn image_merge(mime_type: &str, base64_data: &str, prompt: &str, temperature: f64) -> Self {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: None,
                parts: vec![
                    GeminiPart::InlineData {
                        inline_data: GeminiInlineData {
                            mime_type: mime_type.to_string(),
                            data: base64_data.to_string(),
                        },
                    },
                    GeminiPart::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: Some(temperature),
                response_modalities: Some(vec!["IMAGE".to_string()]),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_merge_shape() {
        let request = GeminiRequest::image_merge("image/png", "AAA=", "Merge with a hat", 0.9);

        assert_eq!(request.contents.len(), 1);
        let parts = &request.contents[0].parts;
        assert_eq!(parts.len(), 2);
        assert!(matches!(
            &parts[0],
            GeminiPart::InlineData { inline_data } if inline_data.mime_type == "image/png"
        ));
        assert!(matches!(
            &parts[1],
            GeminiPart::Text { text } if text == "Merge with a hat"
        ));
    }

    #[test]
    fn test_serialization_uses_wire_field_names() {
        let request = GeminiRequest::image_merge("image/png", "AAA=", "Merge with a hat", 0.9);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(json["contents"][0]["parts"][0]["inlineData"]["data"], "AAA=");
        assert_eq!(json["contents"][0]["parts"][1]["text"], "Merge with a hat");
        assert_eq!(json["generationConfig"]["temperature"], 0.9);
        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
        assert!(json.get("generation_config").is_none());
    }
}
