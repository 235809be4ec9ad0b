use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Placeholder substituted with the merge object in the prompt template.
pub const OBJECT_TOKEN: &str = "{OBJECT}";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub base64_image_data: String,
    pub mime_type: String,
    #[serde(default)]
    pub merge_object: Option<String>,
    pub prompt_template: String,
    pub default_merge_object: String,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.base64_image_data.trim().is_empty() {
            return Err(RelayError::BadRequest(
                "base64ImageData must not be empty".to_string(),
            ));
        }
        if !self.mime_type.starts_with("image/") {
            return Err(RelayError::BadRequest(format!(
                "mimeType must be an image type, got '{}'",
                self.mime_type
            )));
        }
        if !self.prompt_template.contains(OBJECT_TOKEN) {
            return Err(RelayError::BadRequest(format!(
                "promptTemplate must contain the {} token",
                OBJECT_TOKEN
            )));
        }
        if self.default_merge_object.trim().is_empty() {
            return Err(RelayError::BadRequest(
                "defaultMergeObject must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The trimmed merge object; blank input falls back to the default,
    /// inserted verbatim.
    pub fn resolve_merge_object(&self) -> &str {
        match &self.merge_object {
            Some(object) if !object.trim().is_empty() => object.trim(),
            _ => &self.default_merge_object,
        }
    }

    /// Substitutes the merge object into the first `{OBJECT}` occurrence.
    pub fn final_prompt(&self) -> String {
        self.prompt_template
            .replacen(OBJECT_TOKEN, self.resolve_merge_object(), 1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Everything that can go wrong while serving a generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayError {
    /// Vendor API key missing from the environment.
    MissingApiKey,
    /// Request body failed boundary validation.
    BadRequest(String),
    /// Transport failure, non-2xx status, or malformed body from the vendor.
    VendorCall { details: String },
    /// Vendor responded but produced no usable image part.
    EmptyResult(&'static str),
    /// Prompt rejected by the vendor safety filter.
    PromptBlocked(String),
    /// Vendor call did not settle before the configured deadline.
    Timeout,
}

impl RelayError {
    fn status(&self) -> StatusCode {
        match self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn envelope(&self) -> ErrorResponse {
        match self {
            RelayError::MissingApiKey => ErrorResponse {
                error: "API key not configured".to_string(),
                details: None,
            },
            RelayError::BadRequest(details) => ErrorResponse {
                error: "Invalid request".to_string(),
                details: Some(details.clone()),
            },
            RelayError::VendorCall { details } => ErrorResponse {
                error: "API request failed".to_string(),
                details: Some(details.clone()),
            },
            RelayError::EmptyResult(message) => ErrorResponse {
                error: (*message).to_string(),
                details: None,
            },
            RelayError::PromptBlocked(details) => ErrorResponse {
                error: "Prompt blocked by safety filter".to_string(),
                details: Some(details.clone()),
            },
            RelayError::Timeout => ErrorResponse {
                error: "Image generation timed out".to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        let envelope = self.envelope();
        warn!(
            "generation request failed: {}{}",
            envelope.error,
            envelope
                .details
                .as_deref()
                .map(|d| format!(" ({})", d))
                .unwrap_or_default()
        );
        (self.status(), Json(envelope)).into_response()
    }
}
