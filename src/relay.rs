use crate::config::Settings;
use crate::gemini::{GeminiInlineData, GeminiPart, GeminiRequest, GeminiResponse};
use crate::gemini_client::GeminiClient;
use crate::models::{GenerateRequest, GenerateResponse, RelayError};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub gemini: Arc<GeminiClient>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate_image))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
}

/// One inbound request, one outbound vendor call, raced against the
/// configured deadline. No retries; a failed attempt is re-initiated by the
/// user.
#[axum_macros::debug_handler]
pub async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, RelayError> {
    // Bodies that fail to deserialize get the same envelope as any other
    // invalid request instead of axum's plain-text rejection
    let Json(request) =
        payload.map_err(|rejection| RelayError::BadRequest(rejection.body_text()))?;
    request.validate()?;

    // Checked before anything leaves the process
    let api_key = state
        .settings
        .api_key
        .clone()
        .ok_or(RelayError::MissingApiKey)?;

    let final_prompt = request.final_prompt();
    info!(
        "generate request: {} base64 chars of {}, merge object {:?}",
        request.base64_image_data.len(),
        request.mime_type,
        request.resolve_merge_object()
    );
    debug!("final prompt: {}", final_prompt);

    let gemini_request = GeminiRequest::image_merge(
        &request.mime_type,
        &request.base64_image_data,
        &final_prompt,
        state.settings.temperature,
    );

    let response = match timeout(
        state.settings.vendor_timeout(),
        state.gemini.generate_content(&api_key, &gemini_request),
    )
    .await
    {
        Ok(result) => result?,
        Err(_) => return Err(RelayError::Timeout),
    };

    let image = extract_inline_image(&response)?;
    info!(
        "generated image: {} ({} base64 chars)",
        image.mime_type,
        image.data.len()
    );
    Ok(Json(GenerateResponse {
        image: to_data_url(&image.mime_type, &image.data),
    }))
}

/// First candidate, first inline-data part. Every missing level maps to its
/// own empty-result message so the client can tell what the vendor returned.
fn extract_inline_image(response: &GeminiResponse) -> Result<&GeminiInlineData, RelayError> {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            let details = feedback
                .block_reason_message
                .clone()
                .unwrap_or_else(|| reason.clone());
            return Err(RelayError::PromptBlocked(details));
        }
    }

    let candidate = response
        .candidates
        .first()
        .ok_or(RelayError::EmptyResult("No candidates returned"))?;
    let content = candidate
        .content
        .as_ref()
        .ok_or(RelayError::EmptyResult("No parts in response"))?;
    if content.parts.is_empty() {
        return Err(RelayError::EmptyResult("No parts in response"));
    }

    content
        .parts
        .iter()
        .find_map(|part| match part {
            GeminiPart::InlineData { inline_data } => Some(inline_data),
            _ => None,
        })
        .ok_or(RelayError::EmptyResult("No image data in response"))
}

fn to_data_url(mime_type: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_data)
}
