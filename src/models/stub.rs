//! Local stand-in for the Generative Language API, used by unit tests
//!
//! Behaviour is keyed on the model id:
//! - `missing-model`: 404 on lookup and generation
//! - `busy-model`: 429 with an API error envelope
//! - `blocked-model`: prompt blocked by safety feedback
//! - `garbled-model`: 200 with a body that is not JSON
//! - anything else: echoes the part count and image MIME type
//!
//! Requests without `x-goog-api-key: test-key` get a 403 envelope.

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

pub(crate) const STUB_KEY: &str = "test-key";

/// Serve the stub on an ephemeral port and return its base URL
pub(crate) async fn spawn() -> String {
    let app = Router::new().route("/models/:call", get(lookup).post(generate));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn api_error(status: StatusCode, api_status: &str, message: &str) -> Response {
    let body = json!({
        "error": { "code": status.as_u16(), "message": message, "status": api_status }
    });
    (status, Json(body)).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == STUB_KEY)
}

async fn lookup(Path(model): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return api_error(StatusCode::FORBIDDEN, "PERMISSION_DENIED", "API key not valid");
    }
    if model == "missing-model" {
        return api_error(StatusCode::NOT_FOUND, "NOT_FOUND", "model not found");
    }
    Json(json!({ "name": format!("models/{}", model) })).into_response()
}

async fn generate(Path(call): Path<String>, headers: HeaderMap, body: String) -> Response {
    if !authorized(&headers) {
        return api_error(StatusCode::FORBIDDEN, "PERMISSION_DENIED", "API key not valid");
    }

    let Some(model) = call.strip_suffix(":generateContent") else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match model {
        "missing-model" => api_error(StatusCode::NOT_FOUND, "NOT_FOUND", "model not found"),
        "busy-model" => api_error(
            StatusCode::TOO_MANY_REQUESTS,
            "RESOURCE_EXHAUSTED",
            "Quota exceeded",
        ),
        "blocked-model" => Json(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
            .into_response(),
        "garbled-model" => (StatusCode::OK, "<html>gateway</html>").into_response(),
        _ => {
            let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let parts = request["contents"][0]["parts"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            let mime = parts
                .iter()
                .find_map(|p| p["inline_data"]["mime_type"].as_str())
                .unwrap_or("none")
                .to_string();

            Json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": format!("parts={} mime={}", parts.len(), mime) }] },
                    "finishReason": "STOP"
                }]
            }))
            .into_response()
        }
    }
}
