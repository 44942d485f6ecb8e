use anyhow::Result;
use futures_util::StreamExt;
use std::io::{self, Write};

use super::client::{ChatClient, ChatEvent, ChatRequest, Usage};
use crate::ui::{Spinner, Style};

/// Sends a composed request to a model and shows the reply.
///
/// The interactive session only depends on this trait, so it can be driven
/// by a scripted backend in tests.
#[allow(async_fn_in_trait)]
pub trait ChatInvoker {
    /// Sends `request`, displays the reply, and returns the full reply text.
    async fn invoke(&self, request: &ChatRequest) -> Result<String>;
}

/// How replies are requested and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvokeOptions {
    /// Print tokens as they arrive instead of waiting for the whole reply.
    pub stream: bool,
    /// Print token usage after the reply.
    pub count_tokens: bool,
}

impl Default for InvokeOptions {
    fn default() -> Self {
        Self {
            stream: true,
            count_tokens: false,
        }
    }
}

/// Invoker that writes replies to stdout.
pub struct TerminalInvoker {
    client: ChatClient,
    options: InvokeOptions,
}

impl TerminalInvoker {
    pub const fn new(client: ChatClient, options: InvokeOptions) -> Self {
        Self { client, options }
    }

    async fn stream_reply(&self, request: &ChatRequest) -> Result<(String, Option<Usage>)> {
        let mut spinner = Spinner::start("Thinking...");

        let mut stream = self
            .client
            .chat_stream(request, self.options.count_tokens)
            .await?;
        let mut reply = String::new();
        let mut usage = None;

        while let Some(event) = stream.next().await {
            match event? {
                ChatEvent::Content(chunk) => {
                    spinner.stop();
                    print!("{chunk}");
                    io::stdout().flush()?;
                    reply.push_str(&chunk);
                }
                ChatEvent::Usage(u) => usage = Some(u),
            }
        }
        spinner.stop();

        if !reply.is_empty() && !reply.ends_with('\n') {
            println!();
        }
        Ok((reply, usage))
    }

    async fn complete_reply(&self, request: &ChatRequest) -> Result<(String, Option<Usage>)> {
        let mut spinner = Spinner::start("Thinking...");
        let completion = self.client.complete(request).await?;
        spinner.stop();

        if completion.content.ends_with('\n') {
            print!("{}", completion.content);
        } else {
            println!("{}", completion.content);
        }
        Ok((completion.content, completion.usage))
    }
}

impl ChatInvoker for TerminalInvoker {
    async fn invoke(&self, request: &ChatRequest) -> Result<String> {
        let (reply, usage) = if self.options.stream {
            self.stream_reply(request).await?
        } else {
            self.complete_reply(request).await?
        };

        if self.options.count_tokens {
            match usage {
                Some(usage) => println!("{}", Style::muted(format_usage(&usage))),
                None => tracing::warn!("endpoint did not report token usage"),
            }
        }
        Ok(reply)
    }
}

fn format_usage(usage: &Usage) -> String {
    format!(
        "Tokens: prompt {}, completion {}, total {}",
        usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usage() {
        let usage = Usage {
            prompt_tokens: 10,
            completion_tokens: 25,
            total_tokens: 35,
        };
        assert_eq!(
            format_usage(&usage),
            "Tokens: prompt 10, completion 25, total 35"
        );
    }

    #[test]
    fn test_default_options_stream_without_usage() {
        let options = InvokeOptions::default();
        assert!(options.stream);
        assert!(!options.count_tokens);
    }
}
