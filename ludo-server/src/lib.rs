//! LUDO Server - HTTP API for the browser board
//!
//! This crate provides the web backend:
//! - REST API for the three player actions on a single in-memory session
//! - Board geometry for the renderer
//! - Static file serving for the board UI

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use ludo_core::Roster;

pub use error::ApiError;
pub use routes::game::{ActionResponse, SelectRequest};
pub use state::{ServerState, SharedSession};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Board UI files; the repository ships none, so only the API is
    /// served unless this points at a real directory
    pub static_dir: String,
    /// Seed for the session's dice; entropy when `None`
    pub seed: Option<u64>,
    pub roster: Roster,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            static_dir: "ludo/board".to_string(),
            seed: None,
            roster: Roster::default(),
        }
    }
}

impl ServerConfig {
    /// Whether `static_dir` exists and can back the static fallback
    pub fn has_static_dir(&self) -> bool {
        Path::new(&self.static_dir).is_dir()
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Board geometry
        .route("/api/board", get(routes::board::get_board))
        // Game API
        .route("/api/game", get(routes::game::get_game))
        .route("/api/game/start", post(routes::game::start_game))
        .route("/api/game/restart", post(routes::game::restart_game))
        .route("/api/game/roll", post(routes::game::roll_dice))
        .route("/api/game/select", post(routes::game::select_pawn))
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::from_roster(&config.roster, config.seed)?);
    let router = create_router(&config, state);

    tracing::info!("LUDO Server starting on http://0.0.0.0:{}", config.port);
    if config.has_static_dir() {
        tracing::info!("Static files served from: {}", config.static_dir);
    } else {
        tracing::warn!("No static directory at {}; serving the API only", config.static_dir);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8003);
        assert_eq!(config.seed, None);
        assert_eq!(config.roster, Roster::default());
    }

    #[test]
    fn test_has_static_dir() {
        let missing = ServerConfig {
            static_dir: "/nonexistent/board".to_string(),
            ..ServerConfig::default()
        };
        assert!(!missing.has_static_dir());

        let present = ServerConfig {
            static_dir: env!("CARGO_MANIFEST_DIR").to_string(),
            ..ServerConfig::default()
        };
        assert!(present.has_static_dir());

        let file = ServerConfig {
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml").to_string(),
            ..ServerConfig::default()
        };
        assert!(!file.has_static_dir());
    }
}
