//! Terminal UI components (spinner, colors).

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Prints a red `Error:` line to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
}

/// Prints a yellow `Warning:` line to stderr.
pub fn print_warning(message: &str) {
    eprintln!("{} {message}", Style::warning("Warning:"));
}
