//! Chat completion client for OpenAI-compatible APIs.

mod client;
mod error;
mod invoker;
mod sse_parser;

pub use client::{ChatClient, ChatCompletion, ChatEvent, ChatEventStream, ChatRequest, Usage};
pub use error::ChatError;
pub use invoker::{ChatInvoker, InvokeOptions, TerminalInvoker};
