//! Terminal rendering of a game snapshot
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: render() - whole frame
//! - Level 2: render_grid(), render_scoreboard(), render_status()
//! - Level 3: cell_label() - one grid cell
//! - Level 4: static board tables from ludo-core

use std::fmt::Write;

use ludo_core::board::{track_index_at, BASE_CELLS, FINISH_CELLS, HOME_ROW_CELLS};
use ludo_core::{is_safe_spot, Cell, Color, GameState, PawnView, Snapshot, BOARD_SIZE};

/// Width of one rendered cell, in characters
const CELL_WIDTH: usize = 3;

// ============================================================================
// LEVEL 1 - FRAME
// ============================================================================

/// Render the board, scoreboard and status line
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    render_grid(&mut out, snapshot);
    out.push('\n');
    render_scoreboard(&mut out, snapshot);
    render_status(&mut out, snapshot);
    out
}

// ============================================================================
// LEVEL 2 - SECTIONS
// ============================================================================

fn render_grid(out: &mut String, snapshot: &Snapshot) {
    let occupied = snapshot.occupancy();

    let _ = write!(out, "    ");
    for col in 0..BOARD_SIZE {
        let _ = write!(out, "{:>width$}", col, width = CELL_WIDTH);
    }
    out.push('\n');

    for row in 0..BOARD_SIZE {
        let _ = write!(out, "{:>3} ", row);
        for col in 0..BOARD_SIZE {
            let cell = Cell::new(row, col);
            let pawns: Vec<&PawnView> = occupied
                .get(&cell)
                .map(|ids| ids.iter().map(|id| &snapshot.pawns[id.0 as usize]).collect())
                .unwrap_or_default();
            let _ = write!(out, "{:>width$}", cell_label(cell, &pawns), width = CELL_WIDTH);
        }
        out.push('\n');
    }
}

fn render_scoreboard(out: &mut String, snapshot: &Snapshot) {
    for (seat, player) in snapshot.players.iter().enumerate() {
        let marker = if snapshot.state == GameState::InProgress && seat == snapshot.current_player {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{} {:<6} {:<16} {}/{} home",
            marker, player.color, player.name, player.finished, player.total
        );
    }
}

fn render_status(out: &mut String, snapshot: &Snapshot) {
    if let Some(value) = snapshot.dice_value {
        let _ = writeln!(out, "Dice: {}", value);
    }

    let movable: Vec<String> = snapshot
        .pawns
        .iter()
        .filter(|p| p.movable)
        .map(|p| format!("{} ({})", p.id.0, pawn_tag(p)))
        .collect();
    if !movable.is_empty() {
        let _ = writeln!(out, "Movable: {}", movable.join(", "));
    }

    let _ = writeln!(out, "{}", snapshot.message);
}

// ============================================================================
// LEVEL 3 - CELLS
// ============================================================================

/// Text for one grid cell: its pawns if any, otherwise the board marking
fn cell_label(cell: Cell, pawns: &[&PawnView]) -> String {
    match pawns {
        [] => board_marking(cell).to_string(),
        [pawn] => pawn_tag(pawn),
        [first, rest @ ..] if rest.iter().all(|p| p.color == first.color) => {
            format!("{}x{}", first.color.initial(), pawns.len())
        }
        _ => format!("*{}", pawns.len()),
    }
}

/// Short pawn label, e.g. `R1` for RED's first pawn
fn pawn_tag(pawn: &PawnView) -> String {
    format!("{}{}", pawn.color.initial(), pawn.id.slot() + 1)
}

fn board_marking(cell: Cell) -> &'static str {
    if let Some(index) = track_index_at(cell) {
        return if is_safe_spot(index) { "*" } else { "." };
    }
    for color in Color::ALL {
        let seat = color.index();
        if HOME_ROW_CELLS[seat].contains(&cell) {
            return home_marking(color);
        }
        if FINISH_CELLS[seat] == cell {
            return "#";
        }
        if BASE_CELLS[seat].contains(&cell) {
            return "o";
        }
    }
    ""
}

fn home_marking(color: Color) -> &'static str {
    match color {
        Color::Red => "r",
        Color::Green => "g",
        Color::Yellow => "y",
        Color::Blue => "b",
    }
}

// ============================================================================
// TESTS
// ============================================================================
