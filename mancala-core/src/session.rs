//! Game session: the live board plus the turn driver the presentation
//! layer talks to

use serde::{Deserialize, Serialize};

use crate::ai::AlphaBetaAI;
use crate::config::SessionConfig;
use crate::error::MoveError;
use crate::game::{GameResult, GameState, MoveOutcome, Player};

/// One committed move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub pit: usize,
    pub by_computer: bool,
    pub extra_turn: bool,
    pub captured: u8,
}

/// Owns the live game. Every move, human or computer, goes through
/// [`GameState::apply_move`]; search only ever sees copies.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: SessionConfig,
    state: GameState,
    ai: AlphaBetaAI,
    history: Vec<MoveRecord>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let state = GameState::with_first_player(config.first_player);
        let ai = AlphaBetaAI::new(config.search_depth);

        tracing::info!(
            a = %config.name(Player::A),
            b = %config.name(Player::B),
            mode = ?config.mode,
            first = %config.first_player,
            "new game"
        );

        Self {
            config,
            state,
            ai,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn result(&self) -> GameResult {
        self.state.result()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn current_player_name(&self) -> &str {
        self.config.name(self.current_player())
    }

    /// Winner's display name, `None` while ongoing or on a draw
    pub fn winner_name(&self) -> Option<&str> {
        match self.result() {
            GameResult::Winner(player) => Some(self.config.name(player)),
            _ => None,
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.is_over() && self.config.mode.computer() == Some(self.current_player())
    }

    /// Human selection for the player to move. Refused while the computer
    /// is to move.
    pub fn apply_move(&mut self, pit: usize) -> Result<MoveOutcome, MoveError> {
        if self.is_computer_turn() {
            return Err(MoveError::NotYourTurn {
                player: self.current_player().opponent(),
            });
        }
        self.commit(pit, false)
    }

    /// Let the search pick a pit and commit it through the rules engine.
    /// Refused while a human is to move.
    pub fn play_computer_turn(&mut self) -> Result<MoveOutcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let player = self.current_player();
        if !self.is_computer_turn() {
            return Err(MoveError::NotComputerTurn { player });
        }
        let pit = self
            .ai
            .best_move(self.state.board(), player)
            .ok_or(MoveError::NoLegalMove { player })?;
        self.commit(pit, true)
    }

    fn commit(&mut self, pit: usize, by_computer: bool) -> Result<MoveOutcome, MoveError> {
        let outcome = match self.state.apply_move(pit) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(pit, error = %err, "move rejected");
                return Err(err);
            }
        };

        self.state = outcome.state;
        self.history.push(MoveRecord {
            player: outcome.player,
            pit,
            by_computer,
            extra_turn: outcome.extra_turn,
            captured: outcome.capture.map_or(0, |c| c.stones),
        });

        tracing::debug!(
            player = %outcome.player,
            pit,
            last = outcome.last_index,
            extra_turn = outcome.extra_turn,
            captured = ?outcome.capture,
            "move applied"
        );
        if let Some((a, b)) = outcome.final_scores() {
            tracing::info!(a, b, result = ?outcome.state.result(), "game over");
        }

        Ok(outcome)
    }
}
