//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.
//!
//! This module provides utilities for parsing SSE streams from chat completion APIs.

use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

use super::client::{ChatEvent, Usage};
use super::error::ChatError;

/// Response structure for streaming chat completions.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// Converts a raw SSE byte stream into a stream of chat events.
///
/// Handles buffering, line parsing, and SSE protocol details. Stops at the
/// `data: [DONE]` marker or when the byte stream ends.
pub fn sse_to_event_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<ChatEvent, ChatError>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        // Raw bytes: a multi-byte character may straddle two chunks
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(ChatError::Stream(e));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let raw: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = String::from_utf8_lossy(&raw);
                let line = line.trim();

                if line == "data: [DONE]" {
                    return;
                }
                for event in parse_sse_line(line) {
                    yield Ok(event);
                }
            }
        }
    }
}

/// Parses a single SSE line into the events it carries.
///
/// Non-data lines, comments, empty deltas and undecodable payloads yield
/// nothing. A payload may carry both content and usage.
fn parse_sse_line(line: &str) -> Vec<ChatEvent> {
    let Some(json_str) = line.strip_prefix("data:") else {
        return Vec::new();
    };
    let Ok(response) = serde_json::from_str::<StreamResponse>(json_str.trim_start()) else {
        return Vec::new();
    };

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    let mut events = Vec::new();
    if !content.is_empty() {
        events.push(ChatEvent::Content(content));
    }
    if let Some(usage) = response.usage {
        events.push(ChatEvent::Usage(usage));
    }
    events
}
