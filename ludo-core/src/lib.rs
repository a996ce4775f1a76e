//! LUDO Core - Rules engine for the classic four-player race game
//!
//! This crate provides the game logic:
//! - Board geometry (15x15 grid and position-to-cell tables)
//! - Pawns, colors and players
//! - Move resolution and capture/safe-spot rules
//! - Turn controller owning a single game session
//! - Dice sources (fair seeded RNG or scripted)
//! - Player roster configuration

pub mod board;
pub mod dice;
pub mod error;
pub mod pawn;
pub mod position;
pub mod roster;
pub mod rules;
pub mod session;
pub mod snapshot;

// Re-exports for convenient access
pub use board::{board_layout, cell_for, BoardLayout, Cell, BOARD_SIZE};
pub use dice::{Dice, LoadedDice, RandomDice};
pub use error::{ConfigError, GameError};
pub use pawn::{Color, Pawn, PawnId, Player, PAWNS_PER_COLOR, PAWN_COUNT};
pub use position::{Position, HOME_ROW_LEN, TRACK_LEN};
pub use roster::Roster;
pub use rules::{home_entry, is_safe_spot, resolve, start_slot, SAFE_SPOTS};
pub use session::{GameState, Outcome, Session, TurnContext, TurnPhase};
pub use snapshot::{PawnView, PlayerView, Snapshot};
