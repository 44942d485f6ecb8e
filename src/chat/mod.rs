//! Interactive chat mode.
//!
//! A REPL with slash commands, `@` references and a switchable system role.

/// Slash command parsing and autocomplete.
pub mod command;
mod reader;
mod reference;
mod session;
mod ui;

pub use command::RoleContext;
pub use reader::{LineReader, PlainReader, ReadOutcome, TerminalReader};
pub use reference::handle_reference;
pub use session::{ChatSession, SessionState, Turn};
