use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "llm")]
#[command(about = "Chat with OpenAI-compatible language models from the terminal")]
#[command(version)]
pub struct Args {
    /// Prompt to send (reads piped stdin if not provided; interactive otherwise)
    pub prompt: Option<String>,

    /// System role to start with (e.g., coder, chat, creative)
    #[arg(short = 'r', long, global = true)]
    pub role: Option<String>,

    /// Model name
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature (overrides the role's default)
    #[arg(short = 't', long = "temp", global = true, value_parser = parse_temperature)]
    pub temperature: Option<f32>,

    /// Wait for the whole reply instead of streaming it
    #[arg(short = 'n', long, global = true)]
    pub no_stream: bool,

    /// Write fenced code blocks from the reply to FILE
    #[arg(short = 'o', long = "output-codes", value_name = "FILE")]
    pub output_codes: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Print token usage after each reply
    #[arg(long, global = true)]
    pub count_tokens: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available system roles
    Roles,
    /// Interactive chat mode
    Chat,
}

fn parse_temperature(value: &str) -> Result<f32, String> {
    let temperature: f32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=2.0).contains(&temperature) {
        Ok(temperature)
    } else {
        Err(format!("{temperature} is not in 0.0..=2.0"))
    }
}
