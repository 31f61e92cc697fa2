//! Alpha-beta computer player
//!
//! The search explores hypothetical boards with a sowing-only transition:
//! captures and extra turns are not simulated, and plies strictly
//! alternate between the computer and its opponent. The move it returns
//! is committed through [`GameState::apply_move`](crate::GameState::apply_move).

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::eval::{evaluate, is_search_terminal};
use crate::game::{legal_moves, Player};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Plies searched by the computer player
pub const DEFAULT_SEARCH_DEPTH: u32 = 5;

/// Upper bound accepted by session configuration
pub const MAX_SEARCH_DEPTH: u32 = 12;

const NEG_INF: i32 = i32::MIN;
const POS_INF: i32 = i32::MAX;

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Outcome of one search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Chosen pit, `None` when the side has no legal move
    pub pit: Option<usize>,
    /// Store difference expected after the chosen line
    pub score: i32,
    /// Positions visited, root included
    pub nodes: u64,
}

/// Alpha-Beta AI player
#[derive(Clone, Debug)]
pub struct AlphaBetaAI {
    pub depth: u32,
    nodes_searched: u64,
}

impl AlphaBetaAI {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            nodes_searched: 0,
        }
    }

    /// Pit to play for `player`, or `None` if it has no legal move
    pub fn best_move(&mut self, board: &Board, player: Player) -> Option<usize> {
        self.search(board, player).pit
    }

    /// Run the search and report score and node count alongside the move
    pub fn search(&mut self, board: &Board, player: Player) -> SearchResult {
        let mut searcher = Searcher::new(player);
        let result = searcher.search_root(board, effective_depth(self.depth), Pruning::AlphaBeta);
        self.nodes_searched = result.nodes;

        tracing::debug!(
            player = %player,
            depth = self.depth,
            pit = ?result.pit,
            score = result.score,
            nodes = result.nodes,
            "alpha-beta search finished"
        );

        result
    }

    /// Nodes visited by the most recent search
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl Default for AlphaBetaAI {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}

/// One-shot alpha-beta search
pub fn choose_move(board: &Board, player: Player, depth: u32) -> Option<usize> {
    AlphaBetaAI::new(depth).best_move(board, player)
}

/// Exhaustive minimax without pruning. Same move order and tie-break as
/// the alpha-beta search, so both always agree on pit and score.
pub fn minimax(board: &Board, player: Player, depth: u32) -> SearchResult {
    Searcher::new(player).search_root(board, effective_depth(depth), Pruning::None)
}

/// Sowing-only transition used inside the search. Works on a copy.
pub fn simulate_move(board: &Board, pit: usize, player: Player) -> Board {
    let mut next = *board;
    next.sow(player, pit);
    next
}

/// Root-split search: every root move is searched on its own thread with a
/// full window. Agrees with [`minimax`] on pit and score.
#[cfg(feature = "parallel")]
pub fn parallel_search(board: &Board, player: Player, depth: u32) -> SearchResult {
    use rayon::prelude::*;

    let depth = effective_depth(depth);
    let moves = legal_moves(board, player);

    let children: Vec<(usize, i32, u64)> = moves
        .par_iter()
        .map(|&pit| {
            let mut searcher = Searcher::new(player);
            let child = simulate_move(board, pit, player);
            let score = searcher.alpha_beta(&child, depth - 1, NEG_INF, POS_INF, false);
            (pit, score, searcher.nodes)
        })
        .collect();

    let mut result = SearchResult {
        pit: None,
        score: evaluate(board, player),
        nodes: 1,
    };
    let mut best = NEG_INF;
    for (pit, score, nodes) in children {
        result.nodes += nodes;
        if score > best {
            best = score;
            result.pit = Some(pit);
            result.score = score;
        }
    }
    result
}

/// A zero-depth request still looks one ply ahead so a move comes back
fn effective_depth(depth: u32) -> u32 {
    depth.max(1)
}

// ============================================================================
// SEARCH
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pruning {
    AlphaBeta,
    None,
}

/// Per-search scratch state
struct Searcher {
    computer: Player,
    nodes: u64,
}

impl Searcher {
    fn new(computer: Player) -> Self {
        Self { computer, nodes: 0 }
    }

    /// Maximize over the computer's moves. The first move reaching the
    /// best score is kept.
    fn search_root(&mut self, board: &Board, depth: u32, pruning: Pruning) -> SearchResult {
        self.nodes += 1;

        let mut best_pit = None;
        let mut best_score = NEG_INF;
        let mut alpha = NEG_INF;

        for pit in legal_moves(board, self.computer) {
            let child = simulate_move(board, pit, self.computer);
            let score = match pruning {
                Pruning::AlphaBeta => self.alpha_beta(&child, depth - 1, alpha, POS_INF, false),
                Pruning::None => self.minimax(&child, depth - 1, false),
            };

            if score > best_score {
                best_score = score;
                best_pit = Some(pit);
            }
            alpha = alpha.max(score);
        }

        SearchResult {
            pit: best_pit,
            score: if best_pit.is_some() {
                best_score
            } else {
                evaluate(board, self.computer)
            },
            nodes: self.nodes,
        }
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 || is_search_terminal(board) {
            return evaluate(board, self.computer);
        }

        let mover = self.mover(maximizing);
        if maximizing {
            let mut max_eval = NEG_INF;
            for pit in legal_moves(board, mover) {
                let child = simulate_move(board, pit, mover);
                let eval = self.alpha_beta(&child, depth - 1, alpha, beta, false);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = POS_INF;
            for pit in legal_moves(board, mover) {
                let child = simulate_move(board, pit, mover);
                let eval = self.alpha_beta(&child, depth - 1, alpha, beta, true);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }

    fn minimax(&mut self, board: &Board, depth: u32, maximizing: bool) -> i32 {
        self.nodes += 1;

        if depth == 0 || is_search_terminal(board) {
            return evaluate(board, self.computer);
        }

        let mover = self.mover(maximizing);
        let scores = legal_moves(board, mover)
            .into_iter()
            .map(|pit| {
                let child = simulate_move(board, pit, mover);
                self.minimax(&child, depth - 1, !maximizing)
            })
            .collect::<Vec<_>>();

        if maximizing {
            scores.into_iter().max().unwrap_or(NEG_INF)
        } else {
            scores.into_iter().min().unwrap_or(POS_INF)
        }
    }

    fn mover(&self, maximizing: bool) -> Player {
        if maximizing {
            self.computer
        } else {
            self.computer.opponent()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
