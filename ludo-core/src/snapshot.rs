//! Read-only view of a session for renderers

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{occupancy_of, pawn_cells, Cell};
use crate::dice::Dice;
use crate::pawn::{Color, PawnId, PAWNS_PER_COLOR};
use crate::position::Position;
use crate::session::{GameState, Session, TurnPhase};

/// Everything a presentation layer needs after a transition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub phase: Option<TurnPhase>,
    pub current_player: usize,
    pub current_color: Color,
    pub current_name: String,
    pub dice_value: Option<u8>,
    pub has_rolled: bool,
    pub winner: Option<Color>,
    pub message: String,
    pub players: Vec<PlayerView>,
    pub pawns: Vec<PawnView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub color: Color,
    pub name: String,
    pub finished: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PawnView {
    pub id: PawnId,
    pub color: Color,
    pub position: Position,
    pub movable: bool,
    pub cell: Cell,
}

impl<D: Dice> Session<D> {
    pub fn snapshot(&self) -> Snapshot {
        let cells = pawn_cells(self.pawns());
        let turn = self.turn();

        Snapshot {
            state: self.state(),
            phase: self.phase(),
            current_player: turn.current_player_index,
            current_color: self.current_color(),
            current_name: self.current_player().name.clone(),
            dice_value: turn.dice_value,
            has_rolled: turn.has_rolled_this_turn,
            winner: self.winner(),
            message: self.message().to_string(),
            players: self
                .players()
                .iter()
                .map(|p| PlayerView {
                    color: p.color,
                    name: p.name.clone(),
                    finished: self.finished_count(p.color),
                    total: PAWNS_PER_COLOR,
                })
                .collect(),
            pawns: self
                .pawns()
                .iter()
                .zip(cells)
                .map(|(pawn, (_, cell))| PawnView {
                    id: pawn.id,
                    color: pawn.color,
                    position: pawn.position,
                    movable: pawn.movable,
                    cell,
                })
                .collect(),
        }
    }
}

impl Snapshot {
    /// Pawns grouped by the cell they are drawn on
    pub fn occupancy(&self) -> FxHashMap<Cell, Vec<PawnId>> {
        occupancy_of(self.pawns.iter().map(|p| (p.id, p.cell)))
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{BASE_CELLS, TRACK_CELLS};
    use crate::pawn::PawnId;
    use crate::dice::LoadedDice;
    use crate::session::{GameState, Session, TurnPhase};

    #[test]
    fn test_snapshot_after_roll() {
        let mut session = Session::with_dice(LoadedDice::new([1]));
        session.start().unwrap();
        session.roll().unwrap();

        let snap = session.snapshot();
        assert_eq!(snap.state, GameState::InProgress);
        assert_eq!(snap.phase, Some(TurnPhase::AwaitingPawnSelection));
        assert_eq!(snap.dice_value, Some(1));
        assert!(snap.has_rolled);
        assert_eq!(snap.pawns.len(), 16);
        assert_eq!(snap.pawns.iter().filter(|p| p.movable).count(), 4);
        assert_eq!(snap.pawns[0].cell, BASE_CELLS[0][0]);
        assert_eq!(snap.players[2].name, "Player 3");
        assert_eq!(snap.players[2].finished, 0);
        assert_eq!(snap.message, "Select a pawn to move.");
    }

    #[test]
    fn test_snapshot_occupancy_stacks_released_pawns() {
        let mut session = Session::with_dice(LoadedDice::new([6, 6]));
        session.start().unwrap();
        session.roll().unwrap();
        session.select(PawnId(0)).unwrap();
        session.roll().unwrap();
        session.select(PawnId(1)).unwrap();

        let cells = session.snapshot().occupancy();
        assert_eq!(cells[&TRACK_CELLS[0]], vec![PawnId(0), PawnId(1)]);
        // Everyone else sits alone on a yard slot
        assert_eq!(cells.len(), 15);
        assert_eq!(cells[&BASE_CELLS[0][0]], vec![PawnId(2)]);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let session = Session::with_dice(LoadedDice::default());
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["state"], "not_started");
        assert_eq!(json["current_color"], "RED");
        assert_eq!(json["pawns"][5]["position"]["kind"], "base");
        assert_eq!(json["pawns"][5]["id"], 5);
        assert!(json["phase"].is_null());
    }
}
