// OpenAI-compatible chat-completion provider
//
// Works against api.openai.com and any server exposing the same
// `/v1/chat/completions` endpoint (local proxies, test servers).

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

use super::types::{ChatMessage, ProviderRequest, ProviderResponse, StreamChunk};
use super::LlmProvider;
use crate::errors::BuddyError;

const REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl OpenAIProvider {
    /// Provider with custom endpoint and model
    pub fn new(api_key: String, base_url: String, default_model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn to_openai_request(&self, request: &ProviderRequest) -> OpenAIRequest {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };

        OpenAIRequest {
            model,
            messages: request.messages.clone(),
            max_tokens: Some(request.max_tokens),
            temperature: request.temperature,
            stream: request.stream,
        }
    }

    fn from_openai_response(&self, response: OpenAIResponse) -> Result<ProviderResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .context("OpenAI returned no choices in response")?;

        Ok(ProviderResponse {
            id: response.id,
            model: response.model,
            text: choice.message.content.unwrap_or_default().trim().to_string(),
            finish_reason: choice.finish_reason,
            provider: self.name().to_string(),
        })
    }

    async fn post(&self, body: &OpenAIRequest) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| BuddyError::Gateway(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(BuddyError::Gateway(format!("status {}: {}", status, error_body)).into());
        }

        Ok(response)
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        let mut openai_request = self.to_openai_request(request);
        openai_request.stream = false;

        tracing::debug!(
            model = %openai_request.model,
            messages = openai_request.messages.len(),
            "Sending chat completion request"
        );

        let response = self.post(&openai_request).await?;
        let openai_response: OpenAIResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        tracing::debug!(id = %openai_response.id, "Received chat completion");

        self.from_openai_response(openai_response)
    }

    async fn send_message_stream(
        &self,
        request: &ProviderRequest,
    ) -> Result<mpsc::Receiver<Result<StreamChunk>>> {
        let (tx, rx) = mpsc::channel(100);

        let mut openai_request = self.to_openai_request(request);
        openai_request.stream = true;

        tracing::debug!(
            model = %openai_request.model,
            messages = openai_request.messages.len(),
            "Sending streaming chat completion request"
        );

        let response = self.post(&openai_request).await?;

        // Parse the SSE body on a separate task
        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer = Vec::new();
            let mut finish_reason: Option<String> = None;

            while let Some(chunk) = stream.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!("Stream error: {}", e);
                        let _ = tx
                            .send(Err(BuddyError::Gateway(format!("stream failed: {}", e)).into()))
                            .await;
                        return;
                    }
                };
                buffer.extend_from_slice(&bytes);

                // Parse line by line
                while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                    let line_bytes: Vec<u8> = buffer.drain(..=newline_pos).collect();
                    let line = String::from_utf8_lossy(&line_bytes);

                    match parse_sse_line(&line) {
                        Some(SseEvent::Done) => {
                            let _ = tx.send(Ok(StreamChunk::Done { finish_reason })).await;
                            return;
                        }
                        Some(SseEvent::Chunk(stream_chunk)) => {
                            let Some(choice) = stream_chunk.choices.into_iter().next() else {
                                continue;
                            };
                            if let Some(content) = choice.delta.content {
                                if !content.is_empty()
                                    && tx.send(Ok(StreamChunk::TextDelta(content))).await.is_err()
                                {
                                    // Receiver dropped
                                    return;
                                }
                            }
                            if choice.finish_reason.is_some() {
                                finish_reason = choice.finish_reason;
                            }
                        }
                        None => {}
                    }
                }
            }

            // Body ended without [DONE]; a finish_reason still marks a complete reply
            if finish_reason.is_some() {
                let _ = tx.send(Ok(StreamChunk::Done { finish_reason })).await;
            }
        });

        Ok(rx)
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

enum SseEvent {
    Chunk(OpenAIStreamChunk),
    Done,
}

/// Parse one SSE line (`data: {...}` or `data: [DONE]`)
fn parse_sse_line(line: &str) -> Option<SseEvent> {
    let data = line.strip_prefix("data:")?.trim();
    if data == "[DONE]" {
        return Some(SseEvent::Done);
    }
    match serde_json::from_str::<OpenAIStreamChunk>(data) {
        Ok(chunk) => Some(SseEvent::Chunk(chunk)),
        Err(e) => {
            tracing::debug!("Skipping unparseable stream line: {}", e);
            None
        }
    }
}

// OpenAI API types

#[derive(Debug, Clone, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "is_false")]
    stream: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponse {
    id: String,
    model: String,
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIStreamChunk {
    choices: Vec<OpenAIStreamChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIStreamChoice {
    delta: OpenAIDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIDelta {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_provider() -> OpenAIProvider {
        OpenAIProvider::new(
            "k".to_string(),
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_openai_provider_creation() {
        let provider = OpenAIProvider::new(
            "test-key".to_string(),
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
        );
        assert!(provider.is_ok());
    }

    #[test]
    fn test_provider_name_and_model() {
        let provider = default_provider();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.default_model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let provider =
            OpenAIProvider::new("k".to_string(), "http://localhost:8080/".to_string(), "m".to_string())
                .unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_request_uses_default_model() {
        let provider = default_provider();
        let request = ProviderRequest::new(vec![ChatMessage::system("s"), ChatMessage::user("u")])
            .with_temperature(0.8);

        let body = serde_json::to_value(provider.to_openai_request(&request)).unwrap();
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "u");
        assert_eq!(body["max_tokens"], 350);
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn test_parse_sse_lines() {
        assert!(matches!(parse_sse_line("data: [DONE]\n"), Some(SseEvent::Done)));
        assert!(parse_sse_line(": keep-alive\n").is_none());
        assert!(parse_sse_line("\n").is_none());

        let line = r#"data: {"choices":[{"delta":{"content":"Hi"},"finish_reason":null}]}"#;
        match parse_sse_line(line) {
            Some(SseEvent::Chunk(chunk)) => {
                assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hi"));
            }
            _ => panic!("expected a chunk"),
        }
    }
}
