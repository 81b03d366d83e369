//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use crate::{ChatBackend, ChatError};

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

const MAX_OUTPUT_TOKENS: u32 = 500;
const FALLBACK_REPLY: &str = "No response";

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl core::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GeminiChatBackend {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiChatBackend {
    pub fn new(config: GeminiConfig) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::Upstream(e.to_string()))?;
        Ok(Self { client, config })
    }
}

pub fn request_body(prompt: &str) -> JsonValue {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "maxOutputTokens": MAX_OUTPUT_TOKENS,
            "responseMimeType": "text/plain",
        },
    })
}

/// First candidate's first text part, or a fixed fallback.
pub fn extract_reply(body: &JsonValue) -> String {
    let text = body
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(JsonValue::as_str)
        .unwrap_or(FALLBACK_REPLY);
    normalize_reply(text)
}

/// Unify line endings, collapse blank-line runs, trim.
pub fn normalize_reply(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    for ch in unified.chars() {
        if ch == '\n' && out.ends_with('\n') {
            continue;
        }
        out.push(ch);
    }
    out.trim().to_string()
}

#[async_trait]
impl ChatBackend for GeminiChatBackend {
    async fn reply(&self, prompt: &str) -> Result<String, ChatError> {
        if prompt.trim().is_empty() {
            return Err(ChatError::EmptyPrompt);
        }

        let res = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(|e| ChatError::Upstream(e.without_url().to_string()))?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "chat upstream returned an error status");
            return Err(ChatError::Status(status.as_u16()));
        }

        let body: JsonValue = res
            .json()
            .await
            .map_err(|e| ChatError::Decode(e.without_url().to_string()))?;

        Ok(extract_reply(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = request_body("hello");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 500);
        assert_eq!(body["generationConfig"]["responseMimeType"], "text/plain");
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "  Take a slow breath.\r\n\r\n\r\nYou are not alone. " }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        assert_eq!(extract_reply(&body), "Take a slow breath.\nYou are not alone.");
    }

    #[test]
    fn missing_candidates_fall_back() {
        assert_eq!(extract_reply(&json!({})), "No response");
        assert_eq!(extract_reply(&json!({ "candidates": [] })), "No response");
    }

    #[test]
    fn normalize_handles_bare_carriage_returns() {
        assert_eq!(normalize_reply("a\rb\r\rc"), "a\nb\nc");
    }

    #[test]
    fn debug_redacts_api_key() {
        let rendered = format!("{:?}", GeminiConfig::new("AIza-secret"));
        assert!(!rendered.contains("AIza"));
    }

    #[tokio::test]
    async fn empty_prompt_never_leaves_the_process() {
        let backend = GeminiChatBackend::new(GeminiConfig::new("k")).unwrap();
        assert!(matches!(backend.reply("   ").await, Err(ChatError::EmptyPrompt)));
    }
}
