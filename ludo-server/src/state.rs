//! Server state management
//!
//! The server hosts exactly one game session, shared by every request.

use std::sync::{Mutex, MutexGuard};

use ludo_core::{ConfigError, Dice, RandomDice, Roster, Session};

use crate::error::ApiError;

/// Session type the server drives; any dice source will do
pub type SharedSession = Session<Box<dyn Dice + Send>>;

/// Server-wide shared state
pub struct ServerState {
    session: Mutex<SharedSession>,
}

impl ServerState {
    /// Default roster, fair dice from entropy
    pub fn new() -> Self {
        let dice: Box<dyn Dice + Send> = Box::new(RandomDice::from_entropy());
        Self::with_session(Session::with_dice(dice))
    }

    /// Custom roster, fair dice seeded when `seed` is given
    pub fn from_roster(roster: &Roster, seed: Option<u64>) -> Result<Self, ConfigError> {
        let dice: Box<dyn Dice + Send> = Box::new(RandomDice::from_seed(seed));
        Ok(Self::with_session(Session::new(roster, dice)?))
    }

    pub fn with_session(session: SharedSession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    /// Exclusive access to the session for one request
    pub fn session(&self) -> Result<MutexGuard<'_, SharedSession>, ApiError> {
        self.session.lock().map_err(|_| ApiError::Internal)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
