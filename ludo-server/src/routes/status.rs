//! Status endpoint

use axum::{extract::State, Json};
use ludo_core::{Color, GameState};
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;

/// Liveness plus a one-line summary of the hosted game
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub game: GameState,
    /// Whose turn it is; absent unless a game is in progress
    pub current_color: Option<Color>,
}

pub async fn status_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let session = state.session()?;
    let game = session.state();
    let current_color = (game == GameState::InProgress).then(|| session.current_color());

    Ok(Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        game,
        current_color,
    }))
}
