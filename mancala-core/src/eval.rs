//! Position evaluation used by the search

use crate::board::Board;
use crate::game::Player;

/// Store difference from `computer`'s point of view (positive favours it)
pub fn evaluate(board: &Board, computer: Player) -> i32 {
    board.store(computer) as i32 - board.store(computer.opponent()) as i32
}

/// Leaf test for hypothetical positions: one side has no stones in its pits.
/// No end-of-game sweep is simulated.
pub fn is_search_terminal(board: &Board) -> bool {
    board.side_is_empty(Player::A) || board.side_is_empty(Player::B)
}
