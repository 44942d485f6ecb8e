use anyhow::Result;
use clap::Parser;

use cli_llm::cli::commands::ask::{self, AskOptions};
use cli_llm::cli::commands::setup::SetupOptions;
use cli_llm::cli::commands::{chat, roles};
use cli_llm::cli::{Args, Command};
use cli_llm::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.debug);

    let setup = SetupOptions::from(&args);

    match args.command {
        Some(Command::Roles) => {
            roles::print_roles(&setup)?;
        }
        Some(Command::Chat) => {
            chat::run_chat(&setup).await?;
        }
        None => {
            let options = AskOptions {
                prompt: args.prompt,
                output_codes: args.output_codes,
                setup,
            };
            ask::run_ask(options).await?;
        }
    }

    Ok(())
}
