use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::{Instrument, info_span};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every request with an id (incoming `x-request-id` or a fresh v4
/// uuid), wraps the handler in a span carrying it, and reflects it back to
/// the client.
pub async fn inject_request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if !req.headers().contains_key(REQUEST_ID_HEADER) {
        if let Ok(val) = HeaderValue::from_str(&id) {
            req.headers_mut().insert(REQUEST_ID_HEADER, val);
        }
    }

    let span = info_span!(
        "relay_request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path()
    );

    let mut resp = next.run(req).instrument(span).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    resp
}
