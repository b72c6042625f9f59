//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

/// kawaraban - voice-style news recommendation assistant on your terminal
#[derive(Parser, Debug)]
#[command(
    name = "kawaraban",
    version,
    about = "Chat with a news recommendation assistant backed by the MIND dataset"
)]
pub struct Cli {
    /// Initial prompt. With no prompt, an interactive session starts.
    #[arg(value_name = "PROMPT", trailing_var_arg = true)]
    pub prompt: Vec<String>,

    /// Path to config.toml (default: ~/.kawaraban/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the news dataset TSV (overrides the configured path)
    #[arg(long, value_name = "PATH")]
    pub news: Option<PathBuf>,

    /// Print tool calls and results as they are resolved
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
