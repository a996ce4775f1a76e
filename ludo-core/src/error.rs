use std::path::PathBuf;

use crate::pawn::PawnId;

/// Rejected session operations. State is left untouched whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("pawn {0} cannot move this turn")]
    IllegalSelection(PawnId),

    #[error("no pawn with id {0}")]
    UnknownPawn(u8),

    #[error("dice produced {0}, expected 1-6")]
    InvalidRoll(u8),
}

/// Errors that can occur when loading a player roster.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read roster file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write roster file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse roster JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("roster validation error: {0}")]
    Validation(String),
}
