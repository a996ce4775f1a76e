//! Game session and turn controller

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dice::{Dice, RandomDice};
use crate::error::{ConfigError, GameError};
use crate::pawn::{initial_pawns, Color, Pawn, PawnId, Player, PAWNS_PER_COLOR};
use crate::position::Position;
use crate::roster::Roster;
use crate::rules::{is_safe_spot, is_valid_roll, resolve, BONUS_ROLL};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Session lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    NotStarted,
    InProgress,
    GameOver,
}

/// Step within a turn while the game is in progress
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    AwaitingRoll,
    AwaitingPawnSelection,
}

/// Per-turn bookkeeping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContext {
    pub current_player_index: usize,
    /// Last face rolled; kept across turn changes so renderers can show it
    pub dice_value: Option<u8>,
    pub has_rolled_this_turn: bool,
}

/// Result of an accepted operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Started {
        color: Color,
    },
    Rolled {
        color: Color,
        value: u8,
        movable: Vec<PawnId>,
    },
    NoLegalMove {
        color: Color,
        value: u8,
        extra_turn: bool,
    },
    Moved {
        pawn: PawnId,
        from: Position,
        to: Position,
        captured: Option<PawnId>,
        extra_turn: bool,
    },
    Won {
        pawn: PawnId,
        from: Position,
        to: Position,
        winner: Color,
    },
}

const WELCOME: &str = "Welcome to Ludo! Press Start Game.";

// ============================================================================
// SESSION
// ============================================================================

/// One game at one table. Owns every pawn and all turn state; the only way
/// to change it is [`start`](Session::start), [`restart`](Session::restart),
/// [`roll`](Session::roll) and [`select`](Session::select).
#[derive(Clone, Debug)]
pub struct Session<D = RandomDice> {
    players: Vec<Player>,
    pawns: Vec<Pawn>,
    state: GameState,
    turn: TurnContext,
    winner: Option<Color>,
    message: String,
    dice: D,
}

impl Session<RandomDice> {
    /// Default roster, fair dice seeded from `seed` (or entropy)
    pub fn seeded(seed: Option<u64>) -> Self {
        Self::with_dice(RandomDice::from_seed(seed))
    }
}

impl<D: Dice> Session<D> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New session in `NotStarted` for a validated roster
    pub fn new(roster: &Roster, dice: D) -> Result<Self, ConfigError> {
        roster.validate()?;
        Ok(Self::from_players(roster.to_players(), dice))
    }

    /// New session with the default roster
    pub fn with_dice(dice: D) -> Self {
        Self::from_players(Roster::default().to_players(), dice)
    }

    fn from_players(players: Vec<Player>, dice: D) -> Self {
        Self {
            players,
            pawns: initial_pawns(),
            state: GameState::NotStarted,
            turn: TurnContext::default(),
            winner: None,
            message: WELCOME.to_string(),
            dice,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Current step of the turn, `None` unless in progress
    pub fn phase(&self) -> Option<TurnPhase> {
        match self.state {
            GameState::InProgress if self.turn.has_rolled_this_turn => Some(TurnPhase::AwaitingPawnSelection),
            GameState::InProgress => Some(TurnPhase::AwaitingRoll),
            GameState::NotStarted | GameState::GameOver => None,
        }
    }

    pub fn turn(&self) -> TurnContext {
        self.turn
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turn.current_player_index]
    }

    pub fn current_color(&self) -> Color {
        self.current_player().color
    }

    pub fn pawns(&self) -> &[Pawn] {
        &self.pawns
    }

    pub fn pawn(&self, id: PawnId) -> Option<&Pawn> {
        self.pawns.get(id.0 as usize)
    }

    /// Pawns the active player may select right now
    pub fn movable_pawns(&self) -> Vec<PawnId> {
        self.pawns.iter().filter(|p| p.movable).map(|p| p.id).collect()
    }

    pub fn finished_count(&self, color: Color) -> usize {
        self.pawns
            .iter()
            .filter(|p| p.color == color && p.is_finished())
            .count()
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Message describing the last accepted operation
    pub fn message(&self) -> &str {
        &self.message
    }

    #[cfg(test)]
    pub(crate) fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Begin a game. Only valid before the first game or after one ended.
    pub fn start(&mut self) -> Result<Outcome, GameError> {
        if self.state == GameState::InProgress {
            return Err(self.rejected("start a game"));
        }
        Ok(self.reset())
    }

    /// Throw away whatever is on the board and begin a fresh game
    pub fn restart(&mut self) -> Result<Outcome, GameError> {
        Ok(self.reset())
    }

    /// Roll for the active player.
    ///
    /// With no legal move the turn is passed on immediately (kept on a 6).
    pub fn roll(&mut self) -> Result<Outcome, GameError> {
        if self.phase() != Some(TurnPhase::AwaitingRoll) {
            return Err(self.rejected("roll"));
        }

        let value = self.dice.roll();
        if !is_valid_roll(value) {
            return Err(GameError::InvalidRoll(value));
        }

        let color = self.current_color();
        self.turn.dice_value = Some(value);
        self.turn.has_rolled_this_turn = true;

        let movable: Vec<PawnId> = self
            .pawns
            .iter()
            .filter(|p| p.color == color && resolve(p.color, p.position, value).is_some())
            .map(|p| p.id)
            .collect();

        if movable.is_empty() {
            let extra_turn = value == BONUS_ROLL;
            debug!(%color, value, extra_turn, "no legal move");
            self.advance_turn(extra_turn);
            self.message = if extra_turn {
                format!("No possible moves. {} rolls again.", self.current_player().name)
            } else {
                "No possible moves. Next player.".to_string()
            };
            return Ok(Outcome::NoLegalMove { color, value, extra_turn });
        }

        for pawn in &mut self.pawns {
            pawn.movable = movable.contains(&pawn.id);
        }
        debug!(%color, value, movable = movable.len(), "rolled");
        self.message = "Select a pawn to move.".to_string();

        Ok(Outcome::Rolled { color, value, movable })
    }

    /// Move one of the pawns offered by the last roll
    pub fn select(&mut self, id: PawnId) -> Result<Outcome, GameError> {
        if self.phase() != Some(TurnPhase::AwaitingPawnSelection) {
            return Err(self.rejected("select a pawn"));
        }

        let pawn = *self.pawn(id).ok_or(GameError::UnknownPawn(id.0))?;
        if !pawn.movable {
            return Err(GameError::IllegalSelection(id));
        }

        let roll = self.turn.dice_value.ok_or(GameError::IllegalSelection(id))?;
        let to = resolve(pawn.color, pawn.position, roll).ok_or(GameError::IllegalSelection(id))?;
        let from = pawn.position;

        self.pawns[id.0 as usize].position = to;
        self.clear_movable();
        let captured = self.capture_at(pawn.color, to);

        debug!(pawn = %id, %from, %to, "moved");

        if self.finished_count(pawn.color) == PAWNS_PER_COLOR {
            self.state = GameState::GameOver;
            self.winner = Some(pawn.color);
            self.turn.has_rolled_this_turn = false;
            self.message = format!("{} wins the game! Congratulations!", pawn.color);
            info!(winner = %pawn.color, "game over");
            return Ok(Outcome::Won { pawn: id, from, to, winner: pawn.color });
        }

        let extra_turn = roll == BONUS_ROLL || captured.is_some();
        self.advance_turn(extra_turn);
        if let Some(victim) = captured {
            info!(pawn = %id, victim = %victim, "captured");
            self.message = format!("Pawn captured! {} gets an extra turn!", self.current_player().name);
        }

        Ok(Outcome::Moved { pawn: id, from, to, captured, extra_turn })
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    fn reset(&mut self) -> Outcome {
        self.pawns = initial_pawns();
        self.state = GameState::InProgress;
        self.turn = TurnContext::default();
        self.winner = None;
        self.message = format!("{}'s turn. Roll the dice!", self.current_player().name);
        info!(players = self.players.len(), "game started");
        Outcome::Started { color: self.current_color() }
    }

    /// Hand the dice to the next player, or back to the same one
    fn advance_turn(&mut self, extra_turn: bool) {
        self.clear_movable();
        self.turn.has_rolled_this_turn = false;

        if extra_turn {
            self.message = format!("{} gets an extra turn! Roll again.", self.current_player().name);
        } else {
            self.turn.current_player_index = (self.turn.current_player_index + 1) % self.players.len();
            self.message = format!("{}'s turn. Roll the dice!", self.current_player().name);
        }
        debug!(player = %self.current_color(), extra_turn, "turn advanced");
    }

    fn clear_movable(&mut self) {
        for pawn in &mut self.pawns {
            pawn.movable = false;
        }
    }

    /// Send a lone opposing pawn at `to` back to its yard. Safe spots and
    /// slots shared by several opponents are left alone.
    fn capture_at(&mut self, mover: Color, to: Position) -> Option<PawnId> {
        let index = to.track_index()?;
        if is_safe_spot(index) {
            return None;
        }

        let victims: Vec<PawnId> = self
            .pawns
            .iter()
            .filter(|p| p.color != mover && p.position == to)
            .map(|p| p.id)
            .collect();

        match victims.as_slice() {
            [victim] => {
                self.pawns[victim.0 as usize].position = Position::Base;
                Some(*victim)
            }
            _ => None,
        }
    }

    fn rejected(&self, action: &'static str) -> GameError {
        let state = match (self.state, self.phase()) {
            (GameState::NotStarted, _) => "the game has not started",
            (GameState::GameOver, _) => "the game is over",
            (GameState::InProgress, Some(TurnPhase::AwaitingPawnSelection)) => "awaiting pawn selection",
            (GameState::InProgress, _) => "awaiting a roll",
        };
        GameError::InvalidTransition { action, state }
    }

    #[cfg(test)]
    fn place(&mut self, id: u8, position: Position) {
        self.pawns[id as usize].position = position;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::LoadedDice;
    use crate::rules::start_slot;

    fn loaded(faces: &[u8]) -> Session<LoadedDice> {
        let mut session = Session::with_dice(LoadedDice::new(faces.iter().copied()));
        session.start().unwrap();
        session
    }

    #[test]
    fn test_new_session_not_started() {
        let session = Session::with_dice(LoadedDice::default());
        assert_eq!(session.state(), GameState::NotStarted);
        assert_eq!(session.phase(), None);
        assert_eq!(session.message(), WELCOME);
        assert!(session.pawns().iter().all(|p| p.position == Position::Base));
    }

    #[test]
    fn test_actions_rejected_before_start() {
        let mut session = Session::with_dice(LoadedDice::new([6]));
        let err = session.roll().unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidTransition { action: "roll", state: "the game has not started" }
        );
        assert!(session.select(PawnId(0)).is_err());
        assert_eq!(session.dice_mut().remaining(), 1, "rejected roll must not draw");
    }

    #[test]
    fn test_start_enters_awaiting_roll() {
        let session = loaded(&[]);
        assert_eq!(session.state(), GameState::InProgress);
        assert_eq!(session.phase(), Some(TurnPhase::AwaitingRoll));
        assert_eq!(session.current_color(), Color::Red);
        assert_eq!(session.message(), "Player 1's turn. Roll the dice!");
    }

    #[test]
    fn test_start_rejected_mid_game() {
        let mut session = loaded(&[]);
        assert!(matches!(session.start(), Err(GameError::InvalidTransition { .. })));
        assert!(session.restart().is_ok());
    }

    #[test]
    fn test_six_releases_pawn_and_keeps_turn() {
        let mut session = loaded(&[6]);

        let outcome = session.roll().unwrap();
        assert_eq!(
            outcome,
            Outcome::Rolled {
                color: Color::Red,
                value: 6,
                movable: vec![PawnId(0), PawnId(1), PawnId(2), PawnId(3)],
            }
        );
        assert_eq!(session.phase(), Some(TurnPhase::AwaitingPawnSelection));

        let outcome = session.select(PawnId(2)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Moved {
                pawn: PawnId(2),
                from: Position::Base,
                to: Position::Track(start_slot(Color::Red)),
                captured: None,
                extra_turn: true,
            }
        );
        assert_eq!(session.current_color(), Color::Red);
        assert_eq!(session.phase(), Some(TurnPhase::AwaitingRoll));
        assert!(session.movable_pawns().is_empty());
        assert_eq!(session.message(), "Player 1 gets an extra turn! Roll again.");
    }

    #[test]
    fn test_no_legal_move_passes_turn() {
        let mut session = loaded(&[3]);

        let outcome = session.roll().unwrap();
        assert_eq!(
            outcome,
            Outcome::NoLegalMove { color: Color::Red, value: 3, extra_turn: false }
        );
        assert_eq!(session.current_color(), Color::Green);
        assert_eq!(session.phase(), Some(TurnPhase::AwaitingRoll));
        assert_eq!(session.turn().dice_value, Some(3));
    }

    #[test]
    fn test_no_legal_move_on_six_keeps_turn() {
        let mut session = loaded(&[6]);
        // Every RED pawn is done except one stuck deep in the home row
        session.place(0, Position::HomeRow(3));
        for id in 1..4 {
            session.place(id, Position::Finished);
        }

        let outcome = session.roll().unwrap();
        assert_eq!(
            outcome,
            Outcome::NoLegalMove { color: Color::Red, value: 6, extra_turn: true }
        );
        assert_eq!(session.current_color(), Color::Red);
        assert_eq!(session.message(), "No possible moves. Player 1 rolls again.");
    }

    #[test]
    fn test_plain_move_passes_turn() {
        let mut session = loaded(&[4]);
        session.place(0, Position::Track(2));

        session.roll().unwrap();
        let outcome = session.select(PawnId(0)).unwrap();
        assert!(matches!(outcome, Outcome::Moved { extra_turn: false, .. }));
        assert_eq!(session.pawn(PawnId(0)).unwrap().position, Position::Track(6));
        assert_eq!(session.current_color(), Color::Green);
    }

    #[test]
    fn test_select_non_movable_leaves_state_unchanged() {
        let mut session = loaded(&[4]);
        session.place(0, Position::Track(2));
        session.roll().unwrap();

        let before_pawns = session.pawns().to_vec();
        let before_turn = session.turn();
        let before_message = session.message().to_string();

        // Pawn 1 is in the yard and cannot leave on a 4; pawn 4 is GREEN
        assert_eq!(session.select(PawnId(1)), Err(GameError::IllegalSelection(PawnId(1))));
        assert_eq!(session.select(PawnId(4)), Err(GameError::IllegalSelection(PawnId(4))));
        assert_eq!(session.select(PawnId(40)), Err(GameError::UnknownPawn(40)));

        assert_eq!(session.pawns(), before_pawns.as_slice());
        assert_eq!(session.turn(), before_turn);
        assert_eq!(session.message(), before_message);
    }

    #[test]
    fn test_roll_twice_rejected() {
        let mut session = loaded(&[6, 6]);
        session.roll().unwrap();
        let err = session.roll().unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidTransition { action: "roll", state: "awaiting pawn selection" }
        );
    }

    #[test]
    fn test_select_before_roll_rejected() {
        let mut session = loaded(&[]);
        assert!(matches!(
            session.select(PawnId(0)),
            Err(GameError::InvalidTransition { action: "select a pawn", .. })
        ));
    }

    #[test]
    fn test_capture_sends_opponent_home() {
        let mut session = loaded(&[3]);
        session.place(0, Position::Track(2));
        session.place(4, Position::Track(5)); // GREEN

        session.roll().unwrap();
        let outcome = session.select(PawnId(0)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Moved {
                pawn: PawnId(0),
                from: Position::Track(2),
                to: Position::Track(5),
                captured: Some(PawnId(4)),
                extra_turn: true,
            }
        );
        assert_eq!(session.pawn(PawnId(4)).unwrap().position, Position::Base);
        assert_eq!(session.current_color(), Color::Red);
        assert_eq!(session.message(), "Pawn captured! Player 1 gets an extra turn!");
    }

    #[test]
    fn test_no_capture_on_safe_spot() {
        let mut session = loaded(&[3]);
        session.place(0, Position::Track(5));
        session.place(4, Position::Track(8)); // GREEN on a star

        session.roll().unwrap();
        let outcome = session.select(PawnId(0)).unwrap();
        assert!(matches!(outcome, Outcome::Moved { captured: None, extra_turn: false, .. }));
        assert_eq!(session.pawn(PawnId(4)).unwrap().position, Position::Track(8));
        assert_eq!(session.current_color(), Color::Green);
    }

    #[test]
    fn test_no_capture_on_opponent_start_slot() {
        let mut session = loaded(&[3]);
        session.place(0, Position::Track(10));
        session.place(4, Position::Track(start_slot(Color::Green))); // GREEN at home

        session.roll().unwrap();
        let outcome = session.select(PawnId(0)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Moved {
                pawn: PawnId(0),
                from: Position::Track(10),
                to: Position::Track(13),
                captured: None,
                extra_turn: false,
            }
        );
        assert_eq!(session.pawn(PawnId(4)).unwrap().position, Position::Track(13));
        assert_eq!(session.current_color(), Color::Green);
    }

    #[test]
    fn test_no_capture_when_two_opponents_share_slot() {
        let mut session = loaded(&[3]);
        session.place(0, Position::Track(2));
        session.place(4, Position::Track(5)); // GREEN
        session.place(8, Position::Track(5)); // YELLOW

        session.roll().unwrap();
        let outcome = session.select(PawnId(0)).unwrap();
        assert!(matches!(outcome, Outcome::Moved { captured: None, .. }));
        assert_eq!(session.pawn(PawnId(4)).unwrap().position, Position::Track(5));
        assert_eq!(session.pawn(PawnId(8)).unwrap().position, Position::Track(5));
    }

    #[test]
    fn test_own_pawns_stack_without_capture() {
        let mut session = loaded(&[3]);
        session.place(0, Position::Track(2));
        session.place(1, Position::Track(5));

        session.roll().unwrap();
        let outcome = session.select(PawnId(0)).unwrap();
        assert!(matches!(outcome, Outcome::Moved { captured: None, extra_turn: false, .. }));
        assert_eq!(session.pawn(PawnId(1)).unwrap().position, Position::Track(5));
    }

    #[test]
    fn test_red_enters_home_row_from_49() {
        let mut session = loaded(&[3]);
        session.place(0, Position::Track(49));

        session.roll().unwrap();
        session.select(PawnId(0)).unwrap();
        assert_eq!(session.pawn(PawnId(0)).unwrap().position, Position::HomeRow(0));
    }

    #[test]
    fn test_three_sixes_keep_turn() {
        let mut session = loaded(&[6, 6, 6, 2]);

        for _ in 0..3 {
            session.roll().unwrap();
            let id = session.movable_pawns()[0];
            let outcome = session.select(id).unwrap();
            assert!(matches!(outcome, Outcome::Moved { extra_turn: true, .. }));
            assert_eq!(session.current_color(), Color::Red);
        }

        session.roll().unwrap();
        let id = session.movable_pawns()[0];
        session.select(id).unwrap();
        assert_eq!(session.current_color(), Color::Green);
    }

    #[test]
    fn test_win_ends_game() {
        let mut session = loaded(&[2, 6]);
        session.place(0, Position::HomeRow(3));
        for id in 1..4 {
            session.place(id, Position::Finished);
        }

        session.roll().unwrap();
        let outcome = session.select(PawnId(0)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Won {
                pawn: PawnId(0),
                from: Position::HomeRow(3),
                to: Position::Finished,
                winner: Color::Red,
            }
        );
        assert_eq!(session.state(), GameState::GameOver);
        assert_eq!(session.winner(), Some(Color::Red));
        assert_eq!(session.message(), "RED wins the game! Congratulations!");

        assert!(matches!(session.roll(), Err(GameError::InvalidTransition { state: "the game is over", .. })));
        assert!(session.select(PawnId(1)).is_err());

        // A new game may start from GameOver
        session.start().unwrap();
        assert_eq!(session.winner(), None);
        assert_eq!(session.finished_count(Color::Red), 0);
    }

    #[test]
    fn test_invalid_dice_face_rejected() {
        let mut session = loaded(&[9]);
        assert_eq!(session.roll(), Err(GameError::InvalidRoll(9)));
        assert_eq!(session.phase(), Some(TurnPhase::AwaitingRoll));
        assert_eq!(session.turn().dice_value, None);
    }

    #[test]
    fn test_custom_roster_names() {
        let roster = Roster::new(["Ann", "Bo", "Cy", "Di"]);
        let mut session = Session::new(&roster, LoadedDice::new([2])).unwrap();
        session.start().unwrap();
        assert_eq!(session.message(), "Ann's turn. Roll the dice!");
        session.roll().unwrap();
        assert_eq!(session.current_player().name, "Bo");
        assert_eq!(session.message(), "No possible moves. Next player.");

        let bad = Roster::new(["Ann", "Ann", "Cy", "Di"]);
        assert!(Session::new(&bad, LoadedDice::default()).is_err());
    }
}
