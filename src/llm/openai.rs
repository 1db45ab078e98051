//! `OpenAI`-compatible provider implementation
//!
//! Speaks the chat/completions wire format with streaming enabled, which
//! covers `OpenAI` itself as well as Ollama and other compatible servers.

use super::types::{ChatTurn, CompletionRequest, FragmentStream};
use super::{ChatService, LlmError};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::{Event, EventSource};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible service implementation
pub struct OpenAIService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIService {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }
}

#[async_trait]
impl ChatService for OpenAIService {
    async fn stream_chat(&self, request: &CompletionRequest) -> Result<FragmentStream, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let openai_request = OpenAIRequest {
            model: &self.model,
            messages: &request.messages,
            stream: true,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(url = %url, model = %self.model, "Opening completion stream");

        let builder = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request);

        let event_source = EventSource::new(builder)
            .map_err(|e| LlmError::stream(format!("Failed to create event source: {e}")))?;

        Ok(fragment_stream(event_source))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Convert provider SSE events into a stream of raw delta fragments.
///
/// Terminates on the `[DONE]` sentinel or on the first error; the event
/// source is closed on every exit path, including the consumer dropping the
/// stream early.
fn fragment_stream(mut event_source: EventSource) -> FragmentStream {
    let stream = async_stream::stream! {
        while let Some(event) = event_source.next().await {
            match event {
                Ok(Event::Open) => continue,
                Ok(Event::Message(message)) => {
                    if message.data == "[DONE]" {
                        break;
                    }

                    match serde_json::from_str::<OpenAIChunk>(&message.data) {
                        Ok(chunk) => {
                            let delta = chunk
                                .choices
                                .into_iter()
                                .next()
                                .and_then(|choice| choice.delta.content);
                            if let Some(content) = delta {
                                yield Ok(content);
                            }
                        }
                        Err(e) => {
                            yield Err(LlmError::stream(format!("Failed to parse chunk: {e}")));
                            break;
                        }
                    }
                }
                Err(reqwest_eventsource::Error::StreamEnded) => break,
                Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    yield Err(classify_status(status, &body));
                    break;
                }
                Err(e) => {
                    yield Err(LlmError::network(format!("Stream error: {e}")));
                    break;
                }
            }
        }

        event_source.close();
    };

    Box::pin(stream)
}

fn classify_status(status: reqwest::StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<OpenAIErrorResponse>(body)
        .map_or_else(|_| body.to_string(), |resp| resp.error.message);

    match status.as_u16() {
        401 => LlmError::auth(format!("Authentication failed: {message}")),
        429 => LlmError::rate_limit(format!("Rate limit exceeded: {message}")),
        400 => LlmError::invalid_request(format!("Invalid request: {message}")),
        500..=599 => LlmError::server_error(format!("Server error: {message}")),
        _ => LlmError::unknown(format!("HTTP {status}: {message}")),
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIChunk {
    #[serde(default)]
    choices: Vec<OpenAIChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChunkChoice {
    delta: OpenAIDelta,
}

#[derive(Debug, Deserialize)]
struct OpenAIDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}
