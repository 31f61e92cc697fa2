//! Text rendering of the board
//!
//! B's pits run along the top from right to left, A's along the bottom
//! from left to right. B's store sits on the left, A's on the right, so
//! stones travel counter-clockwise. Pits are numbered 1-6 from each
//! player's own left.

use mancala_core::{Board, Player, PITS_PER_SIDE};

/// Board index for the 1-based pit number a player typed
pub fn pit_index(player: Player, number: usize) -> Option<usize> {
    if !(1..=PITS_PER_SIDE).contains(&number) {
        return None;
    }
    Some(player.pit_range().start + number - 1)
}

/// 1-based pit number shown to the owner of board index `index`
pub fn pit_number(index: usize) -> usize {
    index % (PITS_PER_SIDE + 1) + 1
}

pub fn render_board(board: &Board, names: &[String; 2]) -> String {
    let top: Vec<usize> = Player::B.pit_range().rev().collect();
    let bottom: Vec<usize> = Player::A.pit_range().collect();
    let stores = format!(
        "  [{:>2}]{}[{:>2}]",
        board.store(Player::B),
        " ".repeat(PITS_PER_SIDE * 5 + 2),
        board.store(Player::A)
    );

    let lines = [
        format!("        {}", names[Player::B.index()]),
        format!("        {}", number_row(&top)),
        format!("        {}", count_row(board, &top)),
        stores,
        format!("        {}", count_row(board, &bottom)),
        format!("        {}", number_row(&bottom)),
        format!("        {}", names[Player::A.index()]),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn count_row(board: &Board, indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&i| format!("({:>2})", board.get(i)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn number_row(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&i| format!("  {} ", pit_number(i)))
        .collect::<Vec<_>>()
        .join(" ")
}
