//! Roster - who sits at which color

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pawn::{Color, Player};

/// Display names for the four seats, in turn order (RED, GREEN, YELLOW, BLUE)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<String>,
}

impl Roster {
    pub fn new<S: Into<String>>(names: [S; 4]) -> Self {
        Self {
            players: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exactly four distinct, non-blank names
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() != Color::ALL.len() {
            return Err(ConfigError::Validation(format!(
                "expected {} players, got {}",
                Color::ALL.len(),
                self.players.len()
            )));
        }

        let mut seen = HashSet::new();
        for name in &self.players {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Validation("player names must not be blank".to_string()));
            }
            if !seen.insert(trimmed) {
                return Err(ConfigError::Validation(format!("duplicate player name: {}", trimmed)));
            }
        }

        Ok(())
    }

    /// Seats in turn order
    pub fn to_players(&self) -> Vec<Player> {
        Color::ALL
            .iter()
            .zip(&self.players)
            .map(|(&color, name)| Player {
                color,
                name: name.trim().to_string(),
            })
            .collect()
    }

    /// Parse and validate a roster.
    ///
    /// Accepts either `{"players": [...]}` or a bare array of four names.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RosterFile {
            Wrapped(Roster),
            Bare(Vec<String>),
        }

        let roster = match serde_json::from_str::<RosterFile>(content)? {
            RosterFile::Wrapped(roster) => roster,
            RosterFile::Bare(players) => Roster { players },
        };
        roster.validate()?;
        Ok(roster)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(["Player 1", "Player 2", "Player 3", "Player 4"])
    }
}
