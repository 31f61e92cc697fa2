//! Board geometry: fourteen slots arranged in a circle

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::Player;

/// Pits owned by each player (stores excluded)
pub const PITS_PER_SIDE: usize = 6;

/// Total number of slots (12 pits + 2 stores)
pub const BOARD_SLOTS: usize = 14;

/// Stones placed in every pit at the start of a game
pub const STONES_PER_PIT: u8 = 4;

/// Stones in play for a standard game
pub const TOTAL_STONES: u32 = (STONES_PER_PIT as u32) * (2 * PITS_PER_SIDE as u32);

/// Player A's store
pub const STORE_A: usize = 6;

/// Player B's store
pub const STORE_B: usize = 13;

/// Errors produced when parsing a board from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("expected 14 slots, found {found}")]
    WrongSlotCount { found: usize },

    #[error("slot {index} is not a stone count: {value:?}")]
    InvalidCount { index: usize, value: String },

    #[error("board holds {total} stones, at most 48 are in play")]
    TooManyStones { total: u32 },
}

/// Stone counts for every slot, indexed 0-13.
///
/// Indices 0-5 are A's pits, 6 is A's store, 7-12 are B's pits and 13 is
/// B's store. Sowing walks the indices upward and wraps at 14.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    slots: [u8; BOARD_SLOTS],
}

impl Board {
    /// Starting position: four stones per pit, empty stores
    pub fn initial() -> Self {
        let mut slots = [STONES_PER_PIT; BOARD_SLOTS];
        slots[STORE_A] = 0;
        slots[STORE_B] = 0;
        Self { slots }
    }

    /// Board from raw counts, unchecked.
    ///
    /// Sowing and captures add to `u8` slots, so the counts must total at
    /// most [`TOTAL_STONES`]. Use [`Board::try_from_slots`] for untrusted
    /// input.
    pub const fn from_slots(slots: [u8; BOARD_SLOTS]) -> Self {
        Self { slots }
    }

    /// Board from raw counts, rejecting totals above [`TOTAL_STONES`]
    pub fn try_from_slots(slots: [u8; BOARD_SLOTS]) -> Result<Self, BoardParseError> {
        let board = Self { slots };
        let total = board.total_stones();
        if total > TOTAL_STONES {
            return Err(BoardParseError::TooManyStones { total });
        }
        Ok(board)
    }

    pub fn slots(&self) -> &[u8; BOARD_SLOTS] {
        &self.slots
    }

    /// Stone count at `index` (panics when index >= 14)
    pub fn get(&self, index: usize) -> u8 {
        self.slots[index]
    }

    pub fn total_stones(&self) -> u32 {
        self.slots.iter().map(|&s| s as u32).sum()
    }

    pub fn store(&self, player: Player) -> u8 {
        self.slots[player.store_index()]
    }

    /// The six pit counts belonging to `player`
    pub fn pits(&self, player: Player) -> &[u8] {
        &self.slots[player.pit_range()]
    }

    pub fn side_is_empty(&self, player: Player) -> bool {
        self.pits(player).iter().all(|&s| s == 0)
    }

    /// Pit directly across the board, `None` for stores
    pub fn opposite(index: usize) -> Option<usize> {
        match index {
            STORE_A | STORE_B => None,
            i if i < BOARD_SLOTS => Some(12 - i),
            _ => None,
        }
    }

    /// Empty `pit` and distribute its stones one per slot, skipping the
    /// opponent's store. Returns the index of the last slot filled.
    ///
    /// The caller guarantees `pit` is non-empty and owned by `player`.
    pub fn sow(&mut self, player: Player, pit: usize) -> usize {
        let skipped = player.opponent().store_index();
        let mut stones = self.slots[pit];
        self.slots[pit] = 0;

        let mut index = pit;
        while stones > 0 {
            index = (index + 1) % BOARD_SLOTS;
            if index == skipped {
                continue;
            }
            self.slots[index] += 1;
            stones -= 1;
        }
        index
    }

    /// Move every stone left in `player`'s pits into `player`'s store
    pub(crate) fn sweep_side(&mut self, player: Player) -> u8 {
        let mut swept = 0;
        for index in player.pit_range() {
            swept += self.slots[index];
            self.slots[index] = 0;
        }
        self.slots[player.store_index()] += swept;
        swept
    }

    pub(crate) fn take(&mut self, index: usize) -> u8 {
        std::mem::take(&mut self.slots[index])
    }

    pub(crate) fn add(&mut self, index: usize, stones: u8) {
        self.slots[index] += stones;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, count) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", count)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parse 14 counts separated by commas and/or whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() != BOARD_SLOTS {
            return Err(BoardParseError::WrongSlotCount { found: parts.len() });
        }

        let mut slots = [0u8; BOARD_SLOTS];
        for (index, part) in parts.iter().enumerate() {
            slots[index] = part.parse().map_err(|_| BoardParseError::InvalidCount {
                index,
                value: part.to_string(),
            })?;
        }

        Self::try_from_slots(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();
        assert_eq!(board.total_stones(), TOTAL_STONES);
        assert_eq!(board.store(Player::A), 0);
        assert_eq!(board.store(Player::B), 0);
        assert_eq!(board.pits(Player::A), &[4; 6]);
        assert_eq!(board.pits(Player::B), &[4; 6]);
    }

    #[test]
    fn test_opposite_mapping() {
        assert_eq!(Board::opposite(0), Some(12));
        assert_eq!(Board::opposite(1), Some(11));
        assert_eq!(Board::opposite(5), Some(7));
        assert_eq!(Board::opposite(12), Some(0));
        assert_eq!(Board::opposite(STORE_A), None);
        assert_eq!(Board::opposite(STORE_B), None);
        assert_eq!(Board::opposite(14), None);
    }

    #[test]
    fn test_sow_into_own_store() {
        let mut board = Board::initial();
        let last = board.sow(Player::A, 2);
        assert_eq!(last, STORE_A);
        assert_eq!(board.slots(), &[4, 4, 0, 5, 5, 5, 1, 4, 4, 4, 4, 4, 4, 0]);
    }

    #[test]
    fn test_sow_never_fills_opponent_store() {
        for stones in 1..=48u8 {
            for player in [Player::A, Player::B] {
                for pit in player.pit_range() {
                    let mut slots = [0u8; BOARD_SLOTS];
                    slots[pit] = stones;
                    let mut board = Board::from_slots(slots);
                    board.sow(player, pit);
                    assert_eq!(board.store(player.opponent()), 0);
                    assert_eq!(board.total_stones(), stones as u32);
                }
            }
        }
    }

    #[test]
    fn test_sow_wraps_for_b() {
        let mut slots = [0u8; BOARD_SLOTS];
        slots[12] = 3;
        let mut board = Board::from_slots(slots);
        let last = board.sow(Player::B, 12);
        assert_eq!(last, 1);
        assert_eq!(board.get(13), 1);
        assert_eq!(board.get(0), 1);
        assert_eq!(board.get(1), 1);
    }

    #[test]
    fn test_parse_and_display() {
        let board: Board = "4,4,4,4,4,4,0,4,4,4,4,4,4,0".parse().unwrap();
        assert_eq!(board, Board::initial());
        assert_eq!(board.to_string(), "4,4,4,4,4,4,0,4,4,4,4,4,4,0");

        let spaced: Board = "1 2 3 4 5 6 7 0 0 0 1 2 3 4".parse().unwrap();
        assert_eq!(spaced.get(6), 7);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "1,2,3".parse::<Board>(),
            Err(BoardParseError::WrongSlotCount { found: 3 })
        );
        assert!(matches!(
            "4,4,4,4,4,x,0,4,4,4,4,4,4,0".parse::<Board>(),
            Err(BoardParseError::InvalidCount { index: 5, .. })
        ));
        assert_eq!(
            "48,1,0,0,0,0,0,0,0,0,0,0,0,0".parse::<Board>(),
            Err(BoardParseError::TooManyStones { total: 49 })
        );
        assert!(matches!(
            "255,0,0,0,0,0,0,0,0,0,0,0,0,0".parse::<Board>(),
            Err(BoardParseError::TooManyStones { total: 255 })
        ));
    }

    #[test]
    fn test_try_from_slots() {
        let mut slots = [0u8; BOARD_SLOTS];
        slots[3] = 48;
        let board = Board::try_from_slots(slots).unwrap();
        assert_eq!(board.total_stones(), TOTAL_STONES);

        // A full pit still sows without overflowing any slot
        let mut sown = board;
        sown.sow(Player::A, 3);
        assert_eq!(sown.total_stones(), TOTAL_STONES);

        slots[3] = 255;
        assert_eq!(
            Board::try_from_slots(slots),
            Err(BoardParseError::TooManyStones { total: 255 })
        );
        slots[3] = 200;
        slots[10] = 200;
        assert_eq!(
            Board::try_from_slots(slots),
            Err(BoardParseError::TooManyStones { total: 400 })
        );
    }
}
