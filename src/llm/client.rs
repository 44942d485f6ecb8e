use futures_util::Stream;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::pin::Pin;

use super::error::ChatError;
use super::sse_parser::sse_to_event_stream;

/// One fully composed chat exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// User prompt, including any referenced text.
    pub prompt: String,
    /// System prompt of the active role.
    pub system_prompt: String,
    pub model: String,
    pub temperature: f32,
    /// OpenAI-compatible API base, e.g. `https://api.openai.com/v1`.
    pub endpoint: String,
}

/// Token accounting reported by the endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// An item of a streamed completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Content(String),
    Usage(Usage),
}

/// A non-streamed completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: Option<Usage>,
}

pub type ChatEventStream = Pin<Box<dyn Stream<Item = Result<ChatEvent, ChatError>> + Send>>;

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_options: Option<StreamOptions>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Serialize)]
struct StreamOptions {
    include_usage: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ChatClient {
    client: Client,
    api_key: Option<String>,
}

impl ChatClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Starts a streamed completion.
    ///
    /// With `include_usage` the endpoint is asked to append a usage event.
    pub async fn chat_stream(
        &self,
        request: &ChatRequest,
        include_usage: bool,
    ) -> Result<ChatEventStream, ChatError> {
        let body = build_body(request, true, include_usage);
        let response = self.send(&request.endpoint, &body).await?;
        Ok(Box::pin(sse_to_event_stream(response.bytes_stream())))
    }

    /// Requests a complete, non-streamed completion.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, ChatError> {
        let body = build_body(request, false, false);
        let response = self.send(&request.endpoint, &body).await?;

        let text = response.text().await.map_err(ChatError::Stream)?;
        let parsed: CompletionResponse = serde_json::from_str(&text)?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(ChatError::EmptyResponse)?;

        Ok(ChatCompletion {
            content: choice.message.content.unwrap_or_default(),
            usage: parsed.usage,
        })
    }

    async fn send(
        &self,
        endpoint: &str,
        body: &ChatCompletionRequest<'_>,
    ) -> Result<reqwest::Response, ChatError> {
        let url = completions_url(endpoint);
        tracing::debug!(%url, model = body.model, stream = body.stream, "sending chat request");

        let mut http_request = self.client.post(&url).json(body);

        // Local servers often run without authentication
        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|source| ChatError::Connect {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status,
                body: body.trim().to_string(),
            });
        }

        Ok(response)
    }
}

fn build_body(
    request: &ChatRequest,
    stream: bool,
    include_usage: bool,
) -> ChatCompletionRequest<'_> {
    let mut messages = Vec::with_capacity(2);
    if !request.system_prompt.is_empty() {
        messages.push(Message {
            role: "system",
            content: Cow::Borrowed(&request.system_prompt),
        });
    }
    messages.push(Message {
        role: "user",
        content: Cow::Borrowed(&request.prompt),
    });

    ChatCompletionRequest {
        model: &request.model,
        messages,
        temperature: request.temperature,
        stream,
        stream_options: (stream && include_usage).then_some(StreamOptions {
            include_usage: true,
        }),
    }
}

fn completions_url(endpoint: &str) -> String {
    format!("{}/chat/completions", endpoint.trim_end_matches('/'))
}
