//! Board geometry endpoint

use axum::Json;
use ludo_core::{board_layout, BoardLayout};

/// Coordinate tables the browser board draws from
pub async fn get_board() -> Json<BoardLayout> {
    Json(board_layout())
}
