//! Game API endpoints
//!
//! The three player actions (start/restart, roll, select) plus a read of the
//! current snapshot. Every response carries the snapshot taken right after
//! the transition.

use axum::{extract::State, Json};
use ludo_core::{Outcome, PawnId, Snapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;

#[derive(Serialize)]
pub struct ActionResponse {
    pub outcome: Outcome,
    pub snapshot: Snapshot,
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub pawn: u8,
}

/// Get current game snapshot
pub async fn get_game(State(state): State<Arc<ServerState>>) -> Result<Json<Snapshot>, ApiError> {
    let session = state.session()?;
    Ok(Json(session.snapshot()))
}

/// Start a game (rejected while one is in progress)
pub async fn start_game(State(state): State<Arc<ServerState>>) -> Result<Json<Snapshot>, ApiError> {
    let mut session = state.session()?;
    session.start()?;
    tracing::info!("Game started");
    Ok(Json(session.snapshot()))
}

/// Abandon the current game and start over
pub async fn restart_game(State(state): State<Arc<ServerState>>) -> Result<Json<Snapshot>, ApiError> {
    let mut session = state.session()?;
    session.restart()?;
    tracing::info!("Game restarted");
    Ok(Json(session.snapshot()))
}

/// Roll for the active player
pub async fn roll_dice(State(state): State<Arc<ServerState>>) -> Result<Json<ActionResponse>, ApiError> {
    let mut session = state.session()?;
    let outcome = session.roll()?;
    Ok(Json(ActionResponse {
        outcome,
        snapshot: session.snapshot(),
    }))
}

/// Move one of the pawns offered by the last roll
pub async fn select_pawn(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let mut session = state.session()?;
    let outcome = session.select(PawnId(req.pawn))?;
    Ok(Json(ActionResponse {
        outcome,
        snapshot: session.snapshot(),
    }))
}
