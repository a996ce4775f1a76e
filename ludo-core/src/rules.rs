//! Move resolution
//!
//! Pure functions mapping a pawn's position and a roll to its destination.
//! Nothing here touches session state.

use crate::pawn::Color;
use crate::position::{Position, HOME_ROW_LEN, TRACK_LEN};

/// Rolls that release a pawn from its yard
pub const RELEASE_ROLLS: [u8; 2] = [1, 6];

/// Roll that keeps the turn
pub const BONUS_ROLL: u8 = 6;

/// Track slots where nobody can be captured: the four start slots plus one
/// star on each arm of the board.
pub const SAFE_SPOTS: [u8; 8] = [0, 13, 26, 39, 8, 21, 34, 47];

/// Track slot a color enters on
pub fn start_slot(color: Color) -> u8 {
    match color {
        Color::Red => 0,
        Color::Green => 13,
        Color::Yellow => 26,
        Color::Blue => 39,
    }
}

/// Last track slot before a color branches into its home row
pub fn home_entry(color: Color) -> u8 {
    match color {
        Color::Red => 51,
        Color::Green => 12,
        Color::Yellow => 25,
        Color::Blue => 38,
    }
}

pub fn is_safe_spot(index: u8) -> bool {
    SAFE_SPOTS.contains(&index)
}

pub fn is_valid_roll(roll: u8) -> bool {
    (1..=6).contains(&roll)
}

/// Destination of a `color` pawn at `position` after `roll`, or `None` if the
/// pawn cannot move.
pub fn resolve(color: Color, position: Position, roll: u8) -> Option<Position> {
    if !is_valid_roll(roll) {
        return None;
    }

    match position {
        Position::Finished => None,

        Position::Base => {
            if RELEASE_ROLLS.contains(&roll) {
                Some(Position::Track(start_slot(color)))
            } else {
                None
            }
        }

        Position::HomeRow(index) => advance_home_row(index, roll),

        Position::Track(index) => {
            let entry = home_entry(color);
            // The entry slot is never behind a pawn of its own color, so the
            // wrap for RED (entry 51) needs no special casing.
            if index <= entry && index + roll > entry {
                let excess = roll - (entry - index);
                enter_home_row(excess)
            } else {
                Some(Position::Track((index + roll) % TRACK_LEN))
            }
        }
    }
}

fn advance_home_row(index: u8, roll: u8) -> Option<Position> {
    let target = index + roll;
    if target < HOME_ROW_LEN {
        Some(Position::HomeRow(target))
    } else if target == HOME_ROW_LEN {
        Some(Position::Finished)
    } else {
        None
    }
}

/// Steps taken past the entry slot: 1..=5 land in the home row, 6 finishes.
fn enter_home_row(excess: u8) -> Option<Position> {
    match excess {
        1..=5 => Some(Position::HomeRow(excess - 1)),
        6 => Some(Position::Finished),
        _ => None,
    }
}
