//! Chat mode UI components.

use crate::paths;
use crate::ui::Style;

use super::command::RoleContext;
use super::session::SessionState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    println!(
        "{} {}",
        Style::header("LLM Interactive Mode"),
        Style::muted(format!("v{VERSION}"))
    );
    println!("Type /help for available commands");
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_interrupt_hint() {
    println!();
    println!("{}", Style::muted("Use /quit to exit"));
}

/// One-line footer shown before every prompt.
pub fn print_status(state: &SessionState) {
    let cwd = std::env::current_dir().map_or_else(|_| "?".to_string(), |p| paths::display_path(&p));
    println!(
        "[{}] {} {} {} {} {} {}",
        Style::path(cwd),
        Style::muted("role:"),
        Style::value(state.current_role()),
        Style::muted("model:"),
        Style::value(state.model()),
        Style::muted("endpoint:"),
        Style::muted(state.endpoint())
    );
}
