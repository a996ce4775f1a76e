//! LUDO CLI - Command-line interface
//!
//! Commands:
//! - play: Hot-seat game in the terminal
//! - serve: Host a game for the browser board

mod play;
mod render;
mod server;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ludo_core::Roster;

#[derive(Parser)]
#[command(name = "ludo")]
#[command(about = "Four-player LUDO, in the terminal or the browser")]
struct Cli {
    /// Seed for the dice (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Roster JSON file with the four player names
    #[arg(long, global = true, value_name = "FILE")]
    players: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal
    Play(play::PlayArgs),
    /// Start the board server
    Serve(server::ServerArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let roster = load_roster(cli.players.as_deref())?;

    match cli.command {
        Commands::Play(args) => play::run(args, &roster, cli.seed),
        Commands::Serve(args) => server::run(args, roster, cli.seed),
    }
}

/// Logs go to stderr so the board on stdout stays readable
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_roster(path: Option<&Path>) -> Result<Roster> {
    match path {
        Some(path) => {
            let roster = Roster::load(path)
                .with_context(|| format!("Failed to load roster: {}", path.display()))?;
            tracing::info!("Loaded roster from {}", path.display());
            Ok(roster)
        }
        None => Ok(Roster::default()),
    }
}
