//! Mancala CLI - Command-line interface
//!
//! Commands:
//! - play: Interactive game against the computer or a second human
//! - suggest: Ask the computer player for a move on any position
//! - match: Measure the computer player against a baseline

mod match_cmd;
mod play_cmd;
mod render;
mod suggest_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mancala")]
#[command(about = "Kalah with an alpha-beta computer opponent")]
struct Cli {
    /// Random seed for reproducible matches
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the terminal
    Play(play_cmd::PlayArgs),
    /// Suggest a move for a position
    Suggest(suggest_cmd::SuggestArgs),
    /// Play the computer against a baseline opponent
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Suggest(args) => suggest_cmd::run(args),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}
