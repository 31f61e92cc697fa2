//! Mancala Core - Kalah rules engine and AI
//!
//! This crate provides the core game logic:
//! - Board layout (6 pits + 1 store per side, sown counter-clockwise)
//! - The authoritative move transition (sowing, capture, extra turn, end sweep)
//! - Store-difference evaluation
//! - Depth-limited alpha-beta computer player
//! - Session driver and configuration for a presentation layer

pub mod board;
pub mod error;
pub mod game;
pub mod eval;
pub mod ai;
pub mod random;
pub mod config;
pub mod session;

// Re-exports for convenient access
pub use board::{Board, BoardParseError, BOARD_SLOTS, PITS_PER_SIDE, STORE_A, STORE_B, TOTAL_STONES};
pub use error::MoveError;
pub use game::{legal_moves, Capture, GameResult, GameState, MoveOutcome, Player, Sweep};
pub use eval::{evaluate, is_search_terminal};
pub use ai::{choose_move, minimax, simulate_move, AlphaBetaAI, SearchResult, DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH};
#[cfg(feature = "parallel")]
pub use ai::parallel_search;
pub use random::RandomPlayer;
pub use config::{GameMode, SessionConfig};
pub use session::{GameSession, MoveRecord};
