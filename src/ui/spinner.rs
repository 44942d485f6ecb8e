use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A terminal spinner shown while waiting for the first response token.
///
/// Nothing is drawn when stderr is not a terminal. Clears itself when dropped.
pub struct Spinner {
    progress_bar: Option<ProgressBar>,
}

impl Spinner {
    /// Starts a spinner with the given message.
    #[allow(clippy::unwrap_used)]
    pub fn start(message: &str) -> Self {
        if !std::io::stderr().is_terminal() {
            return Self { progress_bar: None };
        }

        let progress_bar = ProgressBar::new_spinner();
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(TICKS)
                .template("{spinner} {msg}")
                .unwrap(),
        );
        progress_bar.set_message(message.to_string());
        progress_bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            progress_bar: Some(progress_bar),
        }
    }

    /// Stops the spinner and clears it. Later calls do nothing.
    pub fn stop(&mut self) {
        if let Some(progress_bar) = self.progress_bar.take() {
            progress_bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}
