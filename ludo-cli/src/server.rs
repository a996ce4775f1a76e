//! Serve command - host one game for the browser board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to ludo-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use ludo_core::Roster;
use ludo_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Directory containing static files for the board
    #[arg(long, default_value = "ludo/board")]
    pub static_dir: PathBuf,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs, roster: Roster, seed: Option<u64>) -> Result<()> {
    let config = configure_server(&args, roster, seed)?;

    tracing::info!("Starting LUDO board server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs, roster: Roster, seed: Option<u64>) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        seed,
        roster,
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_server(config))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Only the API will be served.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
