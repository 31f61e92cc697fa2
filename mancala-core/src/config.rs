//! Session configuration, built before a game starts

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::ai::{DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH};
use crate::game::Player;

/// Who controls side B (or A) besides the human
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Human against the computer, which plays `computer`
    SinglePlayer { computer: Player },
    /// Two humans sharing the board
    TwoPlayer,
}

impl GameMode {
    pub fn computer(&self) -> Option<Player> {
        match self {
            GameMode::SinglePlayer { computer } => Some(*computer),
            GameMode::TwoPlayer => None,
        }
    }
}

/// Names, mode, starting side and search depth
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Display names for A and B
    pub player_names: [String; 2],
    pub mode: GameMode,
    pub first_player: Player,
    pub search_depth: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_names: ["Player 1".to_string(), "AI".to_string()],
            mode: GameMode::SinglePlayer {
                computer: Player::B,
            },
            first_player: Player::A,
            search_depth: DEFAULT_SEARCH_DEPTH,
        }
    }
}

impl SessionConfig {
    /// Human against the computer on side B
    pub fn single_player(name: &str) -> Self {
        Self {
            player_names: [name.to_string(), "AI".to_string()],
            ..Default::default()
        }
    }

    pub fn two_player(name_a: &str, name_b: &str) -> Self {
        Self {
            player_names: [name_a.to_string(), name_b.to_string()],
            mode: GameMode::TwoPlayer,
            ..Default::default()
        }
    }

    pub fn with_first_player(mut self, first: Player) -> Self {
        self.first_player = first;
        self
    }

    pub fn with_search_depth(mut self, depth: u32) -> Self {
        self.search_depth = depth;
        self
    }

    pub fn name(&self, player: Player) -> &str {
        &self.player_names[player.index()]
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for player in [Player::A, Player::B] {
            if self.name(player).trim().is_empty() {
                bail!("name for player {} is empty", player);
            }
        }
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.search_depth) {
            bail!(
                "search depth {} out of range (1-{})",
                self.search_depth,
                MAX_SEARCH_DEPTH
            );
        }
        Ok(())
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: SessionConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
