use anyhow::Result;
use std::io::{self, IsTerminal};

use super::setup::{Setup, SetupOptions};
use crate::chat::{ChatSession, PlainReader, TerminalReader};

/// Runs the interactive session until `/quit` or end of input.
///
/// Uses the line editor on a terminal and plain line reads otherwise.
pub async fn run_chat(options: &SetupOptions) -> Result<()> {
    let setup = Setup::load(options)?;
    let state = setup.session_state();
    let invoker = setup.invoker();

    if io::stdin().is_terminal() {
        ChatSession::new(state, TerminalReader::new(), invoker)
            .run()
            .await
    } else {
        let reader = PlainReader::new(io::stdin().lock());
        ChatSession::new(state, reader, invoker).run().await
    }
}
