//! # llm - Terminal Chat CLI
//!
//! `llm` talks to OpenAI-compatible chat completion endpoints, either with a
//! single prompt or in an interactive session.
//!
//! ## Features
//!
//! - **Interactive mode**: a REPL with `/help`, `/quit` and `/role` commands
//! - **Roles**: named system prompts with their own default temperature
//! - **References**: `@path` or `@text` attaches context to the next prompt
//! - **Streaming**: replies are printed as they arrive
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive session
//! llm
//!
//! # One-shot prompt
//! llm "How do I reverse a Vec?"
//!
//! # Piped input, code blocks saved to a file
//! cat error.log | llm -r coder -o fix.rs
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/cli-llm/config.toml`:
//!
//! ```toml
//! [llm]
//! model = "gpt-4o-mini"
//! endpoint = "https://api.openai.com/v1"
//! role = "coder"
//! ```
//!
//! Roles are read from `~/.config/cli-llm/system_prompts.json`.

/// Interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Fenced code block extraction.
pub mod codeblock;

/// Configuration file management and setting resolution.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Chat completion client for OpenAI-compatible APIs.
pub mod llm;

/// Diagnostic logging setup.
pub mod logging;

/// XDG-style path utilities for configuration.
pub mod paths;

/// System role definitions.
pub mod roles;

/// Terminal UI components (spinner, colors).
pub mod ui;
