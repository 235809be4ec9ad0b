use crate::gemini::{GeminiRequest, GeminiResponse};
use crate::models::RelayError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Thin client for the Gemini `generateContent` endpoint. Built once at
/// startup and shared through `AppState` so tests can point it at a mock
/// server.
#[derive(Debug)]
pub struct GeminiClient {
    http_client: Arc<reqwest::Client>,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(http_client: Arc<reqwest::Client>, api_base: String, model: String) -> Self {
        Self {
            http_client,
            api_base,
            model,
        }
    }

    // Gemini takes the API key as a query parameter, not an auth header.
    fn build_target_url(&self, api_key: &str) -> String {
        let path = format!("models/{}:generateContent", self.model);
        let base = if self.api_base.ends_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        };
        format!("{}?key={}", base, api_key)
    }

    pub async fn generate_content(
        &self,
        api_key: &str,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, RelayError> {
        let target_url = self.build_target_url(api_key);
        info!("Forwarding generation request to model: {}", self.model);

        let response = self
            .http_client
            .post(&target_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::VendorCall {
                details: format!("Failed to send request: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(
                "Generation request failed with status {}: {}",
                status,
                truncate(&error_text, 500)
            );
            return Err(RelayError::VendorCall {
                details: error_text,
            });
        }

        let body = response.text().await.map_err(|e| RelayError::VendorCall {
            details: format!("Failed to read response: {}", e),
        })?;
        debug!("raw response: {}", truncate(&body, 500));

        serde_json::from_str(&body).map_err(|e| RelayError::VendorCall {
            details: format!("Failed to parse response: {}", e),
        })
    }
}

pub fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}
