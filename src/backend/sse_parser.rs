//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.
//!
//! This module provides utilities for parsing SSE streams from chat completion APIs.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

/// Response structure for streaming chat completions.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// Converts a raw SSE byte stream into a stream of text chunks.
///
/// Handles buffering, line parsing, and the `data: [DONE]` terminator.
/// Lines may be split across network chunks, including inside a multibyte
/// character, so bytes are only decoded once a full line has arrived.
pub fn sse_to_text_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {e}"));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = String::from_utf8_lossy(&line);
                let line = line.trim();

                if line == "data: [DONE]" {
                    return;
                }
                if let Some(content) = parse_sse_line(line) {
                    yield Ok(content);
                }
            }
        }

        // A final event without a trailing newline.
        if let Some(content) = parse_sse_line(String::from_utf8_lossy(&buffer).trim()) {
            yield Ok(content);
        }
    }
}

/// Drains an SSE text stream into a single string.
///
/// Harmony segments can only be separated once the whole response is known,
/// so chunks are accumulated rather than printed as they arrive.
pub async fn collect_text(stream: impl Stream<Item = Result<String>>) -> Result<String> {
    use futures_util::StreamExt;

    let mut stream = std::pin::pin!(stream);
    let mut full = String::new();
    while let Some(chunk) = stream.next().await {
        full.push_str(&chunk?);
    }
    Ok(full)
}

/// Parses a single SSE line and extracts the text content.
///
/// Returns `None` for non-data lines, empty content, or parse errors.
///
/// ```ignore
/// let line = r#"data: {"choices":[{"delta":{"content":"Hello"}}]}"#;
/// assert_eq!(parse_sse_line(line), Some("Hello".to_string()));
/// ```
fn parse_sse_line(line: &str) -> Option<String> {
    let json_str = line
        .strip_prefix("data: ")
        .or_else(|| line.strip_prefix("data:"))?;

    let response = serde_json::from_str::<StreamResponse>(json_str).ok()?;

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .filter(|c| !c.is_empty())
        .collect();

    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}
