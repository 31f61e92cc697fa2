//! Move rejection errors

use thiserror::Error;

use crate::game::Player;

/// Reasons a move is rejected. The board is never touched when one of
/// these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Pit is out of range or belongs to the other side
    #[error("pit {pit} does not belong to player {player}")]
    InvalidPitOwnership { player: Player, pit: usize },

    #[error("pit {pit} is empty")]
    EmptyPitSelected { pit: usize },

    /// Raised by callers that ask for a move when the side has none
    #[error("player {player} has no legal move")]
    NoLegalMove { player: Player },

    /// Human input while the computer is to move
    #[error("it is not player {player}'s turn")]
    NotYourTurn { player: Player },

    /// Computer move requested for a side no computer plays
    #[error("player {player} is not played by the computer")]
    NotComputerTurn { player: Player },

    #[error("game is already over")]
    GameOver,
}

impl MoveError {
    /// Selection mistakes the presentation layer should re-prompt for
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MoveError::InvalidPitOwnership { .. } | MoveError::EmptyPitSelected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(MoveError::EmptyPitSelected { pit: 3 }.is_retryable());
        assert!(MoveError::InvalidPitOwnership { player: Player::A, pit: 9 }.is_retryable());
        assert!(!MoveError::GameOver.is_retryable());
        assert!(!MoveError::NoLegalMove { player: Player::B }.is_retryable());
        assert!(!MoveError::NotYourTurn { player: Player::A }.is_retryable());
        assert!(!MoveError::NotComputerTurn { player: Player::A }.is_retryable());
    }

    #[test]
    fn test_messages() {
        let err = MoveError::InvalidPitOwnership { player: Player::B, pit: 2 };
        assert_eq!(err.to_string(), "pit 2 does not belong to player B");
        assert_eq!(MoveError::EmptyPitSelected { pit: 4 }.to_string(), "pit 4 is empty");
        assert_eq!(
            MoveError::NotYourTurn { player: Player::A }.to_string(),
            "it is not player A's turn"
        );
    }
}
