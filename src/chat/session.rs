use anyhow::Result;

use super::command::{CommandOutcome, Input, RoleContext, parse_input};
use super::reader::{LineReader, ReadOutcome};
use super::reference::handle_reference;
use super::ui;
use crate::config::DEFAULT_REASONER_MODEL;
use crate::llm::{ChatInvoker, ChatRequest};
use crate::roles::{RoleError, RolePrompt, RoleRegistry};
use crate::ui::{Style, print_error};

/// Mutable state of the one interactive session.
#[derive(Debug, Clone)]
pub struct SessionState {
    registry: RoleRegistry,
    // Index into `registry`, so the active role always resolves
    current: usize,
    // Name the role was selected by, e.g. `chat-R`
    label: String,
    reasoning: bool,
    default_model: String,
    pinned_model: Option<String>,
    reasoner_model: String,
    endpoint: String,
    temperature_override: Option<f32>,
    referenced_text: String,
}

impl SessionState {
    /// Creates a session in the registry's default role.
    ///
    /// `default_model` is used while the active role names no model.
    pub fn new(
        registry: RoleRegistry,
        default_model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        let current = registry.default_position();
        let label = registry.at(current).name.clone();
        Self {
            registry,
            current,
            label,
            reasoning: false,
            default_model: default_model.into(),
            pinned_model: None,
            reasoner_model: DEFAULT_REASONER_MODEL.to_string(),
            endpoint: endpoint.into(),
            temperature_override: None,
            referenced_text: String::new(),
        }
    }

    /// Pins the model instead of following the active role's model.
    #[must_use]
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.pinned_model = model;
        self
    }

    /// Sets the model behind the `<role>-R` variants.
    #[must_use]
    pub fn with_reasoner_model(mut self, model: impl Into<String>) -> Self {
        self.reasoner_model = model.into();
        self
    }

    /// Pins the temperature instead of following the active role's default.
    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature_override = temperature;
        self
    }

    /// The active role.
    pub fn role(&self) -> &RolePrompt {
        self.registry.at(self.current)
    }

    /// Model for the next request.
    ///
    /// A `-R` variant always uses the reasoner model. Otherwise a pinned model
    /// wins over the role's own, which wins over the default.
    pub fn model(&self) -> &str {
        if self.reasoning {
            return &self.reasoner_model;
        }
        self.pinned_model
            .as_deref()
            .or(self.role().model.as_deref())
            .unwrap_or(&self.default_model)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The pinned temperature, or the active role's default.
    pub fn temperature(&self) -> f32 {
        self.temperature_override.unwrap_or(self.role().temperature)
    }

    /// Text staged by an `@` reference, empty when none is pending.
    pub fn referenced_text(&self) -> &str {
        &self.referenced_text
    }

    /// Stages an `@` reference; see [`handle_reference`].
    pub fn handle_reference(&mut self, text: &str) -> Option<String> {
        handle_reference(text, &mut self.referenced_text)
    }

    /// Builds the outgoing prompt, consuming any pending reference.
    pub fn compose_prompt(&mut self, input: &str) -> String {
        if self.referenced_text.is_empty() {
            return input.to_string();
        }
        let referenced = std::mem::take(&mut self.referenced_text);
        format!("{referenced}\n\n{input}")
    }

    /// Request for `prompt` with the active role, model, temperature and endpoint.
    pub fn chat_request(&self, prompt: String) -> ChatRequest {
        ChatRequest {
            prompt,
            system_prompt: self.role().content.clone(),
            model: self.model().to_string(),
            temperature: self.temperature(),
            endpoint: self.endpoint.clone(),
        }
    }
}

impl RoleContext for SessionState {
    fn current_role(&self) -> &str {
        &self.label
    }

    fn role_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    fn switch_role(&mut self, name: &str) -> Result<String, RoleError> {
        let (index, reasoning) = self.registry.resolve(name)?;
        self.current = index;
        self.reasoning = reasoning;
        let previous = std::mem::replace(&mut self.label, name.to_string());
        tracing::debug!(from = %previous, to = name, model = self.model(), "switched role");
        Ok(previous)
    }
}

/// Whether the loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Continue,
    Exit,
}

/// An interactive chat session.
///
/// Reads lines, runs slash commands and `@` references locally, and sends
/// everything else to the chat invoker.
pub struct ChatSession<R, C> {
    state: SessionState,
    reader: R,
    invoker: C,
}

impl<R: LineReader, C: ChatInvoker> ChatSession<R, C> {
    pub fn new(state: SessionState, reader: R, invoker: C) -> Self {
        Self {
            state,
            reader,
            invoker,
        }
    }

    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs until `/quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        ui::print_header();

        loop {
            ui::print_status(&self.state);

            match self.reader.read_line()? {
                ReadOutcome::Line(line) => {
                    if self.handle_line(&line).await == Turn::Exit {
                        return Ok(());
                    }
                }
                ReadOutcome::Interrupted => ui::print_interrupt_hint(),
                ReadOutcome::Eof => {
                    println!();
                    ui::print_goodbye();
                    return Ok(());
                }
            }
        }
    }

    /// Processes one line of input.
    pub async fn handle_line(&mut self, line: &str) -> Turn {
        match parse_input(line) {
            Input::Empty => Turn::Continue,
            Input::Reference(text) => {
                if let Some(message) = self.state.handle_reference(&text) {
                    println!("{message}");
                }
                Turn::Continue
            }
            Input::Command(command) => match command.execute(&mut self.state) {
                CommandOutcome::Continue(message) => {
                    if !message.is_empty() {
                        println!("{message}");
                    }
                    Turn::Continue
                }
                CommandOutcome::Exit(farewell) => {
                    println!("{}", Style::success(farewell));
                    Turn::Exit
                }
            },
            Input::Prompt(text) => {
                let prompt = self.state.compose_prompt(&text);
                let request = self.state.chat_request(prompt);

                if let Err(e) = self.invoker.invoke(&request).await {
                    tracing::debug!(error = ?e, "chat request failed");
                    print_error(&format!("Error calling LLM: {e:#}"));
                }
                println!();
                Turn::Continue
            }
        }
    }
}
