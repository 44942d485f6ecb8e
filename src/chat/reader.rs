//! Line sources for the interactive loop.

use anyhow::{Context, Result};
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{InquireError, Text};
use std::io::{self, BufRead, Write};

use super::command::SlashCommandCompleter;

const PROMPT_MARKER: &str = ">>>";

/// What one blocking read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// The user aborted the current line; the session continues.
    Interrupted,
    /// The input stream is closed.
    Eof,
}

/// Source of user input lines.
pub trait LineReader {
    /// Shows the prompt marker and blocks for one line.
    fn read_line(&mut self) -> Result<ReadOutcome>;
}

/// Line editor for terminals, with slash-command completion.
///
/// Ctrl+C aborts the current line, Esc closes the session.
pub struct TerminalReader {
    render_config: RenderConfig<'static>,
}

impl TerminalReader {
    pub fn new() -> Self {
        let prompt_style = Styled::new(PROMPT_MARKER)
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        Self { render_config }
    }
}

impl Default for TerminalReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader for TerminalReader {
    fn read_line(&mut self) -> Result<ReadOutcome> {
        let input = Text::new("")
            .with_render_config(self.render_config)
            .with_autocomplete(SlashCommandCompleter)
            .with_help_message("Type a prompt, @ to attach text or a file, /help for commands")
            .prompt();

        match input {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(InquireError::OperationInterrupted) => Ok(ReadOutcome::Interrupted),
            Err(InquireError::OperationCanceled) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e).context("Failed to read input"),
        }
    }
}

/// Reads lines from any buffered source, e.g. stdin when it is not a terminal.
///
/// Only end of input is reported; this reader never yields
/// [`ReadOutcome::Interrupted`].
pub struct PlainReader<B> {
    input: B,
}

impl<B: BufRead> PlainReader<B> {
    pub const fn new(input: B) -> Self {
        Self { input }
    }
}

impl<B: BufRead> LineReader for PlainReader<B> {
    fn read_line(&mut self) -> Result<ReadOutcome> {
        print!("{PROMPT_MARKER} ");
        io::stdout().flush()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(ReadOutcome::Eof),
            Ok(_) => Ok(ReadOutcome::Line(
                line.trim_end_matches(['\n', '\r']).to_string(),
            )),
            Err(e) => Err(e).context("Failed to read from stdin"),
        }
    }
}
