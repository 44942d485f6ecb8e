//! Terminal colours for everything `llm` prints besides model output.

use owo_colors::{OwoColorize, Style as Ansi};
use std::fmt::Display;

fn paint(text: impl Display, ansi: Ansi) -> String {
    text.style(ansi).to_string()
}

/// Colour roles shared by the banner, status line, role listing and messages.
pub struct Style;

impl Style {
    /// Banner and listing titles.
    pub fn header(text: impl Display) -> String {
        paint(text, Ansi::new().bold())
    }

    /// Role and model names.
    pub fn value(text: impl Display) -> String {
        paint(text, Ansi::new().cyan())
    }

    /// Status-line keys, descriptions, hints and the version.
    pub fn muted(text: impl Display) -> String {
        paint(text, Ansi::new().dimmed())
    }

    /// The working directory in the status line and written file paths.
    pub fn path(text: impl Display) -> String {
        paint(text, Ansi::new().blue())
    }

    pub fn success(text: impl Display) -> String {
        paint(text, Ansi::new().green())
    }

    pub fn warning(text: impl Display) -> String {
        paint(text, Ansi::new().yellow())
    }

    pub fn error(text: impl Display) -> String {
        paint(text, Ansi::new().red().bold())
    }

    /// Marks the role a new session starts in.
    pub fn default_marker() -> String {
        Self::muted("(default)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_keep_text() {
        for styled in [
            Style::header("Roles"),
            Style::value("coder"),
            Style::muted("model:"),
            Style::path("~/src"),
            Style::error("Error:"),
        ] {
            assert!(styled.contains('\u{1b}'));
        }
        assert!(Style::default_marker().contains("(default)"));
        assert!(Style::value("coder").contains("coder"));
    }
}
