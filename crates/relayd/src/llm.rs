//! Client for an OpenAI-compatible hosted LLM API.
//!
//! Non-streaming chat completions and image generations. The daemon sends
//! a prompt, gets text back, and the caller post-processes it; nothing in
//! the wire handling is model-specific.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// System message used on every chat flow
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("LLM returned no choices")]
    EmptyResponse,
}

/// A chat message (OpenAI wire shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    n: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: String,
}

/// Hosted LLM client.
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout_secs: u64) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn request(&self, url: String) -> reqwest::RequestBuilder {
        let builder = self.http.post(url);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Check the API answers at all (model listing endpoint).
    pub async fn is_available(&self) -> bool {
        let builder = self.http.get(format!("{}/models", self.base_url));
        let builder = match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        };
        builder
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Send a non-streaming chat completion and return the first choice's
    /// message content.
    pub async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, LlmError> {
        let body = ChatRequest {
            model,
            messages,
            temperature,
            max_tokens,
            n: 1,
            stream: false,
        };

        debug!("Chat request to {} ({} messages)", model, messages.len());
        let response = self
            .request(format!("{}/chat/completions", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)?;

        info!("Chat completion from {}: {} chars", model, content.len());
        Ok(content)
    }

    /// Generate a single image and return its URL.
    pub async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        size: &str,
    ) -> Result<String, LlmError> {
        let body = ImageRequest {
            model,
            prompt,
            size,
            quality: "standard",
            n: 1,
        };

        let response = self
            .request(format!("{}/images/generations", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let parsed: ImageResponse = response.json().await?;
        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.url)
            .ok_or(LlmError::EmptyResponse)
    }
}

/// Keep upstream error bodies short enough for a log line.
fn excerpt(body: &str) -> String {
    const MAX: usize = 300;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chat_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 0,
            "model": "gpt-4o-mini",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
        })
    }

    #[tokio::test]
    async fn test_chat_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"model": "gpt-4o-mini", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("hello there")))
            .mount(&server)
            .await;

        let client = LlmClient::new(&server.uri(), Some("test-key".to_string()), 5).unwrap();
        let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user("hi")];
        let out = client.chat("gpt-4o-mini", &messages, 0.1, Some(100)).await.unwrap();
        assert_eq!(out, "hello there");
    }

    #[tokio::test]
    async fn test_chat_maps_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = LlmClient::new(&server.uri(), None, 5).unwrap();
        let err = client
            .chat("gpt-4o-mini", &[ChatMessage::user("hi")], 0.1, None)
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("rate limited"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chat_empty_choices() {
        let server = MockServer::start().await;
        let mut body = chat_body("x");
        body["choices"] = json!([]);
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = LlmClient::new(&server.uri(), None, 5).unwrap();
        let err = client
            .chat("gpt-4o-mini", &[ChatMessage::user("hi")], 0.1, None)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_generate_image_returns_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .and(body_partial_json(json!({"model": "dall-e-3", "size": "1024x1024", "n": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "created": 0,
                "data": [{"url": "https://img.example/pic.png"}]
            })))
            .mount(&server)
            .await;

        let client = LlmClient::new(&server.uri(), None, 5).unwrap();
        let url = client
            .generate_image("dall-e-3", "a lighthouse", "1024x1024")
            .await
            .unwrap();
        assert_eq!(url, "https://img.example/pic.png");
    }

    #[tokio::test]
    async fn test_is_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let client = LlmClient::new(&server.uri(), None, 5).unwrap();
        assert!(client.is_available().await);
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(1000);
        let cut = excerpt(&long);
        assert!(cut.len() < 400);
        assert!(cut.ends_with("..."));
    }
}
