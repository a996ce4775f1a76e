//! Abstract pawn positions

use serde::{Deserialize, Serialize};

/// Slots on the shared circular track
pub const TRACK_LEN: u8 = 52;

/// Slots in each color's private home row
pub const HOME_ROW_LEN: u8 = 5;

/// Where a pawn is, independent of how the board is drawn.
///
/// `HomeRow` indices are private to the pawn's own color and increase
/// toward `Finished`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Position {
    /// In the starting yard, not yet entered
    Base,
    /// Shared track slot in `[0, 52)`
    Track(u8),
    /// Home row slot in `[0, 5)`
    HomeRow(u8),
    /// Route completed
    Finished,
}

impl Position {
    pub fn track_index(&self) -> Option<u8> {
        match *self {
            Position::Track(index) => Some(index),
            _ => None,
        }
    }

    /// Check that any index carried by the position is in range
    pub fn is_valid(&self) -> bool {
        match *self {
            Position::Track(index) => index < TRACK_LEN,
            Position::HomeRow(index) => index < HOME_ROW_LEN,
            Position::Base | Position::Finished => true,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Base => write!(f, "base"),
            Position::Track(index) => write!(f, "track {}", index),
            Position::HomeRow(index) => write!(f, "home row {}", index),
            Position::Finished => write!(f, "finished"),
        }
    }
}
