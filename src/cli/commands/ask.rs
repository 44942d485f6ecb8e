use anyhow::Result;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use super::chat::run_chat;
use super::setup::{Setup, SetupOptions};
use crate::chat::RoleContext;
use crate::codeblock::{extract_code_blocks, render_code_file};
use crate::fs::atomic_write;
use crate::input::InputReader;
use crate::llm::ChatInvoker;
use crate::paths::display_path;
use crate::ui::{Style, print_warning};

pub struct AskOptions {
    pub prompt: Option<String>,
    pub output_codes: Option<PathBuf>,
    pub setup: SetupOptions,
}

/// Sends one prompt and prints the reply.
///
/// The prompt comes from the argument or piped stdin; with neither, this
/// falls through to interactive mode.
pub async fn run_ask(options: AskOptions) -> Result<()> {
    let Some(prompt) = read_prompt(options.prompt)? else {
        return run_chat(&options.setup).await;
    };

    let setup = Setup::load(&options.setup)?;
    let state = setup.session_state();
    tracing::debug!(role = state.current_role(), chars = prompt.len(), "sending prompt");

    let request = state.chat_request(prompt);
    let reply = setup.invoker().invoke(&request).await?;

    if let Some(path) = &options.output_codes {
        write_code_blocks(&reply, path)?;
    }
    Ok(())
}

fn read_prompt(argument: Option<String>) -> Result<Option<String>> {
    if let Some(prompt) = argument.filter(|p| !p.trim().is_empty()) {
        return Ok(Some(prompt));
    }
    if io::stdin().is_terminal() {
        return Ok(None);
    }
    let piped = InputReader::read_stdin()?;
    Ok((!piped.is_empty()).then_some(piped))
}

/// Writes the fenced code blocks of `reply` to `path`.
///
/// Returns `false` and leaves `path` alone when the reply has none.
fn write_code_blocks(reply: &str, path: &Path) -> Result<bool> {
    let blocks = extract_code_blocks(reply);
    if blocks.is_empty() {
        print_warning("No code blocks found in the reply; nothing written");
        return Ok(false);
    }

    atomic_write(path, &render_code_file(&blocks))?;
    eprintln!(
        "{} Wrote {} code block(s) to {}",
        Style::success("✓"),
        blocks.len(),
        Style::path(display_path(path))
    );
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_code_blocks() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("main.py");
        let reply = "Here:\n```python\nprint(1)\n```\nand\n```\nprint(2)\n```\n";

        assert!(write_code_blocks(reply, &path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "print(1)\n\nprint(2)\n");
    }

    #[test]
    fn test_write_code_blocks_without_blocks_leaves_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("main.py");
        fs::write(&path, "old").unwrap();

        assert!(!write_code_blocks("no code here", &path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn test_prompt_argument_wins() {
        assert_eq!(
            read_prompt(Some("hello".to_string())).unwrap(),
            Some("hello".to_string())
        );
    }
}
