use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::sse_parser::{collect_text, sse_to_text_stream};
use crate::history::Turn;

/// A single chat-completion call.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub temperature: f32,
    pub stream: bool,
}

// Borrows the request so messages are serialized without cloning.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Value,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ChatClient {
    /// `base_url` includes the API version prefix, e.g. `http://localhost:8080/v1`.
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Sends `request` and returns the raw text content of the reply.
    ///
    /// Streaming responses are drained before returning.
    pub async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let url = self.completions_url();

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            stream: request.stream,
        };

        let mut http_request = self.client.post(&url).json(&body);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        info!(
            url = %url,
            model = %request.model,
            messages = request.messages.len(),
            stream = request.stream,
            "sending chat completion"
        );

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed with status {status}: {body}");
        }

        let text = if request.stream {
            collect_text(sse_to_text_stream(response.bytes_stream())).await?
        } else {
            let body = response
                .text()
                .await
                .context("Failed to read API response body")?;
            parse_completion(&body)?
        };

        debug!(bytes = text.len(), "received chat completion");
        Ok(text)
    }
}

/// Extracts the assistant text from a non-streaming response body.
fn parse_completion(body: &str) -> Result<String> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).context("Failed to parse API response")?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("API response contained no choices"))?;

    Ok(content_to_text(choice.message.content))
}

/// Coerces a message `content` value to text.
///
/// Strings are used as-is and content-part arrays contribute their `text`
/// fields. Anything else is not textual and becomes empty.
fn content_to_text(content: Value) -> String {
    match content {
        Value::String(text) => text,
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| match part {
                Value::String(text) => Some(text.as_str()),
                Value::Object(map) => map.get("text").and_then(Value::as_str),
                _ => None,
            })
            .collect(),
        _ => String::new(),
    }
}
