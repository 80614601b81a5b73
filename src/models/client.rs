//! Generative Language API client
//!
//! Provides the `GenerativeModel` seam used by the invoker and its
//! production implementation:
//! - Endpoint: POST {base}/models/{id}:generateContent
//! - Auth: `x-goog-api-key` header
//! - Images travel base64-encoded as `inline_data` parts

use crate::errors::{Result, TriageError};
use crate::models::types::{
    ApiErrorEnvelope, Content, GenerateContentRequest, GenerateContentResponse, ImageAttachment,
    InlineData, Part,
};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use std::time::Duration;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can turn a prompt (and optional image) into text
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate text with the given model identifier
    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String>;
}

/// The API credential, redacted in debug output
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Environment variables checked in order
    pub const ENV_VARS: [&'static str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(TriageError::ConfigError("API key is empty".to_string()));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(TriageError::ConfigError(
                "API key must not contain whitespace".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Resolve the key from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the key through an arbitrary lookup (first non-empty wins)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                TriageError::ConfigError(format!(
                    "no API key found; set {}",
                    Self::ENV_VARS.join(" or ")
                ))
            })
            .and_then(Self::new)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// HTTP client for the Generative Language API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: ApiKey,
}

impl GeminiClient {
    /// Create client with custom configuration
    pub fn with_config(base_url: &str, api_key: ApiKey, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TriageError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that a model identifier resolves upstream
    pub async fn model_exists(&self, model_id: &str) -> Result<bool> {
        let url = format!("{}/models/{}", self.base_url, model_id);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .send()
            .await
            .map_err(|e| upstream(model_id, format!("Failed to send request: {}", e)))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(upstream(model_id, describe_http_error(status, &body)))
            }
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model_id);
        let request = build_request(prompt, image);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| upstream(model_id, format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| upstream(model_id, format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(upstream(model_id, describe_http_error(status, &body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| upstream(model_id, format!("Failed to parse response: {}", e)))?;

        extract_text(parsed).map_err(|message| upstream(model_id, message))
    }
}

fn upstream(model_id: &str, message: String) -> TriageError {
    TriageError::Upstream {
        model: model_id.to_string(),
        message,
    }
}

/// Build the request body: prompt first, then the optional image part
pub(crate) fn build_request(prompt: &str, image: Option<&ImageAttachment>) -> GenerateContentRequest {
    let mut parts = vec![Part {
        text: Some(prompt.to_string()),
        inline_data: None,
    }];

    if let Some(image) = image {
        parts.push(Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: BASE64.encode(&image.data),
            }),
        });
    }

    GenerateContentRequest {
        contents: vec![Content { parts }],
    }
}

/// Concatenate the text parts of the first candidate
pub(crate) fn extract_text(response: GenerateContentResponse) -> std::result::Result<String, String> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(format!("Prompt blocked: {}", reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| "No candidates in response".to_string())?;

    let finish_reason = candidate.finish_reason.unwrap_or_default();
    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        return Err(if finish_reason.is_empty() {
            "Empty response text".to_string()
        } else {
            format!("Empty response text (finish reason: {})", finish_reason)
        });
    }

    Ok(text)
}

/// Prefer the API's own error message over the raw body
fn describe_http_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(api_status) => format!(
                "HTTP {} {}: {}",
                status.as_u16(),
                api_status,
                envelope.error.message
            ),
            None => format!("HTTP {}: {}", status.as_u16(), envelope.error.message),
        },
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => format!("HTTP {}: {}", status, body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stub;

    #[test]
    fn test_api_key_rejects_blank() {
        assert!(ApiKey::new("   ").is_err());
        assert!(ApiKey::new("abc def").is_err());
        assert!(ApiKey::new(" key-123 ").is_ok());
    }

    #[test]
    fn test_api_key_lookup_order() {
        let key = ApiKey::from_lookup(|name| match name {
            "GEMINI_API_KEY" => Some(String::new()),
            "GOOGLE_API_KEY" => Some("google-key".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(key.expose(), "google-key");

        let missing = ApiKey::from_lookup(|_| None);
        assert!(matches!(missing, Err(TriageError::ConfigError(_))));
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        assert!(!format!("{:?}", key).contains("super-secret"));
    }

    #[test]
    fn test_client_trims_base_url() {
        let client = GeminiClient::with_config(
            "http://localhost:8080/v1beta/",
            ApiKey::new("k").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1beta");
    }

    #[test]
    fn test_build_request_text_only() {
        let request = build_request("assess", None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "contents": [{ "parts": [{ "text": "assess" }] }] })
        );
    }

    #[test]
    fn test_build_request_with_image() {
        let image = ImageAttachment::new("image/png", vec![0u8, 1, 2]);
        let request = build_request("assess", Some(&image));
        let json = serde_json::to_value(&request).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "assess");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "AAEC");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"STATUS: "},{"text":"GREEN"}]},"finishReason":"STOP"}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "STATUS: GREEN");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(parsed).is_err());
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_text(parsed).unwrap_err(), "Prompt blocked: SAFETY");
    }

    #[test]
    fn test_describe_http_error_uses_envelope() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let message = describe_http_error(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(message, "HTTP 429 RESOURCE_EXHAUSTED: Quota exceeded");
    }

    async fn stub_client(key: &str) -> GeminiClient {
        let base = crate::models::stub::spawn().await;
        GeminiClient::with_config(&base, ApiKey::new(key).unwrap(), Duration::from_secs(5)).unwrap()
    }

    fn upstream_message(err: TriageError) -> (String, String) {
        match err {
            TriageError::Upstream { model, message } => (model, message),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_over_http() {
        let client = stub_client(stub::STUB_KEY).await;
        let image = ImageAttachment::new("image/jpeg", vec![0xFFu8, 0xD8]);

        let text = client.generate("echo-model", "assess", None).await.unwrap();
        assert_eq!(text, "parts=1 mime=none");

        let text = client.generate("echo-model", "assess", Some(&image)).await.unwrap();
        assert_eq!(text, "parts=2 mime=image/jpeg");
    }

    #[tokio::test]
    async fn test_generate_http_error_becomes_upstream() {
        let client = stub_client(stub::STUB_KEY).await;
        let err = client.generate("busy-model", "assess", None).await.unwrap_err();

        let (model, message) = upstream_message(err);
        assert_eq!(model, "busy-model");
        assert_eq!(message, "HTTP 429 RESOURCE_EXHAUSTED: Quota exceeded");
    }

    #[tokio::test]
    async fn test_generate_sends_api_key() {
        let client = stub_client("wrong-key").await;
        let err = client.generate("echo-model", "assess", None).await.unwrap_err();

        let (_, message) = upstream_message(err);
        assert_eq!(message, "HTTP 403 PERMISSION_DENIED: API key not valid");
    }

    #[tokio::test]
    async fn test_generate_blocked_and_garbled_responses() {
        let client = stub_client(stub::STUB_KEY).await;

        let err = client.generate("blocked-model", "assess", None).await.unwrap_err();
        assert_eq!(upstream_message(err).1, "Prompt blocked: SAFETY");

        let err = client.generate("garbled-model", "assess", None).await.unwrap_err();
        assert!(upstream_message(err).1.starts_with("Failed to parse response"));
    }

    #[tokio::test]
    async fn test_generate_unreachable_server() {
        let client = GeminiClient::with_config(
            "http://127.0.0.1:9",
            ApiKey::new("k").unwrap(),
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.generate("echo-model", "assess", None).await.unwrap_err();
        assert!(upstream_message(err).1.starts_with("Failed to send request"));
    }

    #[tokio::test]
    async fn test_model_exists_over_http() {
        let client = stub_client(stub::STUB_KEY).await;
        assert!(client.model_exists("echo-model").await.unwrap());
        assert!(!client.model_exists("missing-model").await.unwrap());

        let client = stub_client("wrong-key").await;
        assert!(client.model_exists("echo-model").await.is_err());
    }

    #[test]
    fn test_describe_http_error_raw_body() {
        let message = describe_http_error(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(message.contains("502"));
        assert!(message.contains("upstream down"));
    }
}
