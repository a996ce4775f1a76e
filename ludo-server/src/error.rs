//! API error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ludo_core::GameError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("game session unavailable")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Game(GameError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            ApiError::Game(GameError::IllegalSelection(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Game(GameError::InvalidRoll(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Game(GameError::UnknownPawn(_)) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
