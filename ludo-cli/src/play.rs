//! Play command - a hot-seat game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: create_session(), game_loop()
//! - Level 3: apply_command() - one player action
//! - Level 4: parse_command() - input parsing

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;

use ludo_core::{Dice, GameState, PawnId, RandomDice, Roster, Session};

use crate::render::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Start the first game right away instead of waiting for `s`
    #[arg(long)]
    pub autostart: bool,
}

/// One line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Roll,
    Select(PawnId),
    Start,
    Help,
    Quit,
}

const HELP: &str = "Commands: r = roll, <pawn number> = move that pawn, s = start/restart, h = help, q = quit";

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the session from roster and seed
/// 2. Read commands until quit or end of input
pub fn run(args: PlayArgs, roster: &Roster, seed: Option<u64>) -> Result<()> {
    let mut session = create_session(roster, seed)?;
    if args.autostart {
        session.start()?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    game_loop(&mut session, stdin.lock(), stdout.lock())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn create_session(roster: &Roster, seed: Option<u64>) -> Result<Session> {
    let session = Session::new(roster, RandomDice::from_seed(seed)).context("Invalid player roster")?;
    tracing::info!(seed = ?seed, "Session created");
    Ok(session)
}

/// Prompt, read, apply, redraw, until `q` or EOF
fn game_loop<D: Dice, R: BufRead, W: Write>(
    session: &mut Session<D>,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{}", render(&session.snapshot()))?;
    writeln!(output, "{}", HELP)?;
    prompt(&mut output)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => writeln!(output, "{}", HELP)?,
            Some(command) => {
                apply_command(session, command, &mut output)?;
                writeln!(output, "{}", render(&session.snapshot()))?;
            }
            None if line.trim().is_empty() => {}
            None => writeln!(output, "Unknown command: {}. {}", line.trim(), HELP)?,
        }
        prompt(&mut output)?;
    }

    writeln!(output, "Goodbye!")?;
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Apply one action; rejected actions are reported, not fatal
fn apply_command<D: Dice, W: Write>(
    session: &mut Session<D>,
    command: Command,
    output: &mut W,
) -> Result<()> {
    let result = match command {
        Command::Roll => session.roll(),
        Command::Select(id) => session.select(id),
        Command::Start if session.state() == GameState::InProgress => session.restart(),
        Command::Start => session.start(),
        Command::Help | Command::Quit => return Ok(()),
    };

    match result {
        Ok(outcome) => tracing::debug!(?outcome, "Applied"),
        Err(err) => writeln!(output, "Rejected: {}", err)?,
    }
    Ok(())
}

fn prompt<W: Write>(output: &mut W) -> Result<()> {
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

// ============================================================================
// LEVEL 4 - PARSING
// ============================================================================

fn parse_command(line: &str) -> Option<Command> {
    let word = line.trim().to_ascii_lowercase();
    match word.as_str() {
        "r" | "roll" => Some(Command::Roll),
        "s" | "start" | "restart" => Some(Command::Start),
        "h" | "help" | "?" => Some(Command::Help),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => word.parse::<u8>().ok().map(|id| Command::Select(PawnId(id))),
    }
}

// ============================================================================
// TESTS
// ============================================================================
