//! Game state and the authoritative move transition

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, PITS_PER_SIDE, STORE_A, STORE_B};
use crate::error::MoveError;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Side of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Owns pits 0-5 and store 6
    A,
    /// Owns pits 7-12 and store 13
    B,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Board indices of this player's six pits
    pub fn pit_range(self) -> Range<usize> {
        match self {
            Player::A => 0..PITS_PER_SIDE,
            Player::B => STORE_A + 1..STORE_A + 1 + PITS_PER_SIDE,
        }
    }

    pub fn store_index(self) -> usize {
        match self {
            Player::A => STORE_A,
            Player::B => STORE_B,
        }
    }

    pub fn owns_pit(self, index: usize) -> bool {
        self.pit_range().contains(&index)
    }

    /// Index into per-player arrays (A = 0, B = 1)
    pub fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

impl FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Player::A),
            "b" => Ok(Player::B),
            other => Err(format!("unknown player {:?} (expected a or b)", other)),
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Winner(Player),
    Draw,
}

/// Stones taken by a capture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Mover's pit where the last stone landed
    pub landing: usize,
    /// Opponent's pit across from `landing`
    pub opposite: usize,
    /// Total stones moved into the mover's store
    pub stones: u8,
}

/// End-of-game collection of a side's remaining stones
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sweep {
    /// Side whose pits were emptied into its own store
    pub player: Player,
    pub stones: u8,
}

/// Everything the presentation layer needs after a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub state: GameState,
    pub player: Player,
    pub pit: usize,
    pub last_index: usize,
    pub capture: Option<Capture>,
    pub extra_turn: bool,
    pub game_over: bool,
    pub sweep: Option<Sweep>,
}

impl MoveOutcome {
    /// Final store totals (A, B) once the game has ended
    pub fn final_scores(&self) -> Option<(u8, u8)> {
        self.state.final_scores()
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Board plus turn bookkeeping (copy to branch)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    to_move: Player,
    result: GameResult,
}

impl GameState {
    /// Fresh game with A to move
    pub fn new() -> Self {
        Self::with_first_player(Player::A)
    }

    pub fn with_first_player(first: Player) -> Self {
        Self {
            board: Board::initial(),
            to_move: first,
            result: GameResult::Ongoing,
        }
    }

    /// Arbitrary position, treated as ongoing. The end-of-game check only
    /// runs after a move, as it does during play.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        Self {
            board,
            to_move,
            result: GameResult::Ongoing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.to_move
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    /// Store totals (A, B) once the game has ended
    pub fn final_scores(&self) -> Option<(u8, u8)> {
        self.is_over()
            .then(|| (self.board.store(Player::A), self.board.store(Player::B)))
    }

    /// Non-empty pits of the player to move
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves(&self.board, self.to_move)
    }

    /// Apply a move for the player to move.
    ///
    /// Sows from `pit`, then resolves capture, extra turn and the end of
    /// the game. Rejected moves return an error and leave `self` as is.
    pub fn apply_move(&self, pit: usize) -> Result<MoveOutcome, MoveError> {
        let player = self.to_move;
        self.validate(player, pit)?;

        let mut board = self.board;
        let last_index = board.sow(player, pit);
        let capture = resolve_capture(&mut board, player, last_index);

        let extra_turn = last_index == player.store_index();
        let to_move = if extra_turn { player } else { player.opponent() };

        let sweep = resolve_end_of_game(&mut board);
        let result = match sweep {
            Some(_) => decide_winner(&board),
            None => GameResult::Ongoing,
        };

        Ok(MoveOutcome {
            state: GameState {
                board,
                to_move,
                result,
            },
            player,
            pit,
            last_index,
            capture,
            extra_turn,
            game_over: result != GameResult::Ongoing,
            sweep,
        })
    }

    fn validate(&self, player: Player, pit: usize) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if !player.owns_pit(pit) {
            return Err(MoveError::InvalidPitOwnership { player, pit });
        }
        if self.board.get(pit) == 0 {
            return Err(MoveError::EmptyPitSelected { pit });
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Non-empty pits owned by `player`, in index order
pub fn legal_moves(board: &Board, player: Player) -> Vec<usize> {
    player.pit_range().filter(|&i| board.get(i) > 0).collect()
}

/// Last stone in a previously empty own pit takes the opposite pile too
fn resolve_capture(board: &mut Board, player: Player, last_index: usize) -> Option<Capture> {
    if !player.owns_pit(last_index) || board.get(last_index) != 1 {
        return None;
    }
    let opposite = Board::opposite(last_index)?;
    if board.get(opposite) == 0 {
        return None;
    }

    let stones = board.take(last_index) + board.take(opposite);
    board.add(player.store_index(), stones);
    Some(Capture {
        landing: last_index,
        opposite,
        stones,
    })
}

/// When one side is empty the other side collects its own remaining pits
fn resolve_end_of_game(board: &mut Board) -> Option<Sweep> {
    let collector = if board.side_is_empty(Player::A) {
        Player::B
    } else if board.side_is_empty(Player::B) {
        Player::A
    } else {
        return None;
    };

    let stones = board.sweep_side(collector);
    Some(Sweep {
        player: collector,
        stones,
    })
}

fn decide_winner(board: &Board) -> GameResult {
    let a = board.store(Player::A);
    let b = board.store(Player::B);
    if a > b {
        GameResult::Winner(Player::A)
    } else if b > a {
        GameResult::Winner(Player::B)
    } else {
        GameResult::Draw
    }
}

// ============================================================================
// TESTS
// ============================================================================
