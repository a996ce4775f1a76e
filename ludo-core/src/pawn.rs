//! Colors, pawns and players

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Number of pawns each color owns
pub const PAWNS_PER_COLOR: usize = 4;

/// Total number of pawns in a game
pub const PAWN_COUNT: usize = PAWNS_PER_COLOR * Color::ALL.len();

/// Player color, in turn rotation order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Red = 0,
    Green = 1,
    Yellow = 2,
    Blue = 3,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    /// Seat index (0-3)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Color at a seat index, wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Blue => "BLUE",
        }
    }

    /// Single-letter tag used by text renderers
    pub fn initial(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Blue => 'B',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Pawn identifier: `color_index * 4 + slot`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PawnId(pub u8);

impl PawnId {
    pub fn new(color: Color, slot: usize) -> Self {
        PawnId((color.index() * PAWNS_PER_COLOR + slot) as u8)
    }

    /// Owning color derived from the id layout
    pub fn color(self) -> Color {
        Color::from_index(self.0 as usize / PAWNS_PER_COLOR)
    }

    /// Yard slot (0-3) the pawn was created in
    pub fn slot(self) -> usize {
        self.0 as usize % PAWNS_PER_COLOR
    }
}

impl std::fmt::Display for PawnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pawn and its current state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pawn {
    pub id: PawnId,
    pub color: Color,
    pub position: Position,
    pub movable: bool,
}

impl Pawn {
    /// Fresh pawn sitting in its yard
    pub fn new(id: PawnId) -> Self {
        Self {
            id,
            color: id.color(),
            position: Position::Base,
            movable: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position == Position::Finished
    }
}

/// All 16 pawns in id order, every one in its yard
pub fn initial_pawns() -> Vec<Pawn> {
    Color::ALL
        .iter()
        .flat_map(|&color| (0..PAWNS_PER_COLOR).map(move |slot| Pawn::new(PawnId::new(color, slot))))
        .collect()
}

/// A seat at the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub color: Color,
    pub name: String,
}
