//! Board geometry: the 15x15 grid and the tables placing positions on it

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::pawn::{Color, Pawn, PawnId, PAWNS_PER_COLOR};
use crate::position::{Position, HOME_ROW_LEN, TRACK_LEN};
use crate::rules::{start_slot, SAFE_SPOTS};

/// Cells per side of the square grid
pub const BOARD_SIZE: u8 = 15;

/// Grid cell, row-major from the top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check if this cell is on the grid
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }
}

const fn c(row: u8, col: u8) -> Cell {
    Cell::new(row, col)
}

/// Shared track, clockwise from RED's start slot
pub const TRACK_CELLS: [Cell; TRACK_LEN as usize] = [
    c(6, 1), c(6, 2), c(6, 3), c(6, 4), c(6, 5),                 // 0-4
    c(5, 6), c(4, 6), c(3, 6), c(2, 6), c(1, 6), c(0, 6),        // 5-10
    c(0, 7),                                                     // 11
    c(0, 8), c(1, 8), c(2, 8), c(3, 8), c(4, 8), c(5, 8),        // 12-17
    c(6, 9), c(6, 10), c(6, 11), c(6, 12), c(6, 13), c(6, 14),   // 18-23
    c(7, 14),                                                    // 24
    c(8, 14), c(8, 13), c(8, 12), c(8, 11), c(8, 10), c(8, 9),   // 25-30
    c(9, 8), c(10, 8), c(11, 8), c(12, 8), c(13, 8), c(14, 8),   // 31-36
    c(14, 7),                                                    // 37
    c(14, 6), c(13, 6), c(12, 6), c(11, 6), c(10, 6), c(9, 6),   // 38-43
    c(8, 5), c(8, 4), c(8, 3), c(8, 2), c(8, 1), c(8, 0),        // 44-49
    c(7, 0),                                                     // 50
    c(6, 0),                                                     // 51
];

/// Home row cells, indexed by color then home row slot
pub const HOME_ROW_CELLS: [[Cell; HOME_ROW_LEN as usize]; 4] = [
    [c(7, 1), c(7, 2), c(7, 3), c(7, 4), c(7, 5)],       // RED
    [c(1, 7), c(2, 7), c(3, 7), c(4, 7), c(5, 7)],       // GREEN
    [c(7, 13), c(7, 12), c(7, 11), c(7, 10), c(7, 9)],   // YELLOW
    [c(13, 7), c(12, 7), c(11, 7), c(10, 7), c(9, 7)],   // BLUE
];

/// Center triangle a finished pawn rests on
pub const FINISH_CELLS: [Cell; 4] = [c(7, 6), c(6, 7), c(7, 8), c(8, 7)];

/// Yard slots, indexed by color then slot
pub const BASE_CELLS: [[Cell; PAWNS_PER_COLOR]; 4] = [
    [c(1, 1), c(1, 4), c(4, 1), c(4, 4)],          // RED
    [c(1, 10), c(1, 13), c(4, 10), c(4, 13)],      // GREEN
    [c(10, 10), c(10, 13), c(13, 10), c(13, 13)],  // YELLOW
    [c(10, 1), c(10, 4), c(13, 1), c(13, 4)],      // BLUE
];

/// Grid cell for a pawn of `color` at `position`.
///
/// `base_slot` picks the yard cell for `Base` pawns and is ignored otherwise.
/// Out-of-range indices are clamped to the last slot of their table.
pub fn cell_for(color: Color, position: Position, base_slot: usize) -> Cell {
    let seat = color.index();
    match position {
        Position::Base => BASE_CELLS[seat][base_slot.min(PAWNS_PER_COLOR - 1)],
        Position::Track(index) => TRACK_CELLS[(index % TRACK_LEN) as usize],
        Position::HomeRow(index) => HOME_ROW_CELLS[seat][index.min(HOME_ROW_LEN - 1) as usize],
        Position::Finished => FINISH_CELLS[seat],
    }
}

/// Cells for every pawn.
///
/// Yard pawns are packed onto their color's yard slots in id order, so the
/// yard always fills from the first slot regardless of which pawns left.
pub fn pawn_cells(pawns: &[Pawn]) -> Vec<(PawnId, Cell)> {
    let mut next_base_slot = [0usize; 4];
    pawns
        .iter()
        .map(|pawn| {
            let slot = if pawn.position == Position::Base {
                let seat = pawn.color.index();
                let slot = next_base_slot[seat];
                next_base_slot[seat] += 1;
                slot
            } else {
                0
            };
            (pawn.id, cell_for(pawn.color, pawn.position, slot))
        })
        .collect()
}

/// Group placed pawns by cell, keeping their order within a cell
pub fn occupancy_of(placed: impl IntoIterator<Item = (PawnId, Cell)>) -> FxHashMap<Cell, Vec<PawnId>> {
    let mut cells: FxHashMap<Cell, Vec<PawnId>> = FxHashMap::default();
    for (id, cell) in placed {
        cells.entry(cell).or_default().push(id);
    }
    cells
}

/// Track slot drawn at a cell, if any
pub fn track_index_at(cell: Cell) -> Option<u8> {
    TRACK_CELLS.iter().position(|&t| t == cell).map(|i| i as u8)
}

/// Every table a renderer needs, in serializable form
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardLayout {
    pub size: u8,
    pub track: Vec<Cell>,
    pub home_rows: Vec<ColorCells>,
    pub bases: Vec<ColorCells>,
    pub finish: Vec<ColorCells>,
    pub start_slots: Vec<ColorSlot>,
    pub safe_spots: Vec<u8>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorCells {
    pub color: Color,
    pub cells: Vec<Cell>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorSlot {
    pub color: Color,
    pub index: u8,
}

pub fn board_layout() -> BoardLayout {
    let per_color = |cells: &dyn Fn(Color) -> Vec<Cell>| {
        Color::ALL
            .iter()
            .map(|&color| ColorCells { color, cells: cells(color) })
            .collect::<Vec<_>>()
    };

    BoardLayout {
        size: BOARD_SIZE,
        track: TRACK_CELLS.to_vec(),
        home_rows: per_color(&|color| HOME_ROW_CELLS[color.index()].to_vec()),
        bases: per_color(&|color| BASE_CELLS[color.index()].to_vec()),
        finish: per_color(&|color| vec![FINISH_CELLS[color.index()]]),
        start_slots: Color::ALL
            .iter()
            .map(|&color| ColorSlot { color, index: start_slot(color) })
            .collect(),
        safe_spots: SAFE_SPOTS.to_vec(),
    }
}
