use inquire::autocompletion::{Autocomplete, Replacement};

use crate::roles::RoleError;

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show available commands"),
    ("/quit", "Exit the program"),
    ("/role", "Show or switch the system role"),
];

const HELP_TEXT: &str = "Available commands:
  /help              - Show this help message
  /quit              - Exit the program
  /role [role_name]  - Switch system role
  /role              - Show current role and available roles
  /role <role>-R     - Switch role and use the reasoning model

Start a line with @ to attach a file (@path) or text (@text) to your next prompt.";

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(' ') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// The slice of session state that slash commands may read and change.
pub trait RoleContext {
    /// Name of the active role.
    fn current_role(&self) -> &str;

    /// All role names in display order.
    fn role_names(&self) -> Vec<&str>;

    /// Makes `name` the active role and returns the previous role's name.
    ///
    /// Unknown names leave the active role unchanged.
    fn switch_role(&mut self, name: &str) -> Result<String, RoleError>;
}

/// Slash command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Quit,
    /// `/role` with its (trimmed) argument; empty means "show".
    Role(String),
    Unknown(String),
}

/// Result of running a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Print the text and keep reading input.
    Continue(String),
    /// Print the farewell and end the session.
    Exit(String),
}

/// Input types
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Empty,
    /// Raw `@...` text for the reference handler.
    Reference(String),
    Command(SlashCommand),
    Prompt(String),
}

/// Classifies one line of user input.
pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }
    if input.starts_with('@') {
        return Input::Reference(input.to_string());
    }

    parse_command(input).map_or_else(
        || Input::Prompt(input.to_string()),
        |(name, args)| Input::Command(SlashCommand::from_parts(&name, &args)),
    )
}

/// Splits a `/name args` line into the lower-cased name and the raw arguments.
///
/// Returns `None` when the trimmed line does not start with `/`. Unknown
/// names are not rejected here.
pub fn parse_command(line: &str) -> Option<(String, String)> {
    let rest = line.trim().strip_prefix('/')?;
    let (name, args) = rest.split_once(' ').unwrap_or((rest, ""));
    Some((name.to_lowercase(), args.to_string()))
}

/// Parses and runs a command by name.
pub fn execute(name: &str, args: &str, ctx: &mut impl RoleContext) -> CommandOutcome {
    SlashCommand::from_parts(name, args).execute(ctx)
}

impl SlashCommand {
    pub fn from_parts(name: &str, args: &str) -> Self {
        match name {
            "help" => Self::Help,
            "quit" => Self::Quit,
            "role" => Self::Role(args.trim().to_string()),
            _ => Self::Unknown(name.to_string()),
        }
    }

    pub fn execute(&self, ctx: &mut impl RoleContext) -> CommandOutcome {
        match self {
            Self::Help => CommandOutcome::Continue(HELP_TEXT.to_string()),
            Self::Quit => CommandOutcome::Exit("Goodbye!".to_string()),
            Self::Role(name) if name.is_empty() => CommandOutcome::Continue(format!(
                "Current role: {}\nAvailable roles: {}",
                ctx.current_role(),
                ctx.role_names().join(", ")
            )),
            Self::Role(name) => match ctx.switch_role(name) {
                Ok(old) => {
                    CommandOutcome::Continue(format!("Switched role from '{old}' to '{name}'"))
                }
                Err(e) => CommandOutcome::Continue(e.to_string()),
            },
            Self::Unknown(name) => CommandOutcome::Continue(format!(
                "Unknown command: /{name}\nType /help for available commands."
            )),
        }
    }
}
