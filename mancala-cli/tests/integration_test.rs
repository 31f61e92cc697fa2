//! Integration tests for the Mancala engine
//!
//! Tests the full stack: rules engine, search, random baseline, sessions
//! and configuration files

use mancala_core::{
    choose_move, minimax, AlphaBetaAI, Board, GameMode, GameResult, GameSession, GameState,
    MoveError, Player, RandomPlayer, SessionConfig, TOTAL_STONES,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn board(slots: [u8; 14]) -> Board {
    Board::from_slots(slots)
}

/// Random legal boards with 48 stones spread over all slots
fn scattered_board(rng: &mut ChaCha8Rng) -> Board {
    let mut slots = [0u8; 14];
    for _ in 0..TOTAL_STONES {
        slots[rng.gen_range(0..14)] += 1;
    }
    Board::from_slots(slots)
}

// ============================================================================
// RULES ENGINE
// ============================================================================

#[test]
fn test_conservation_over_random_games() {
    for seed in 0..25 {
        let mut player = RandomPlayer::with_seed(seed);
        let mut state = GameState::new();

        while let Some(pit) = player.best_move(&state) {
            let outcome = state.apply_move(pit).unwrap();
            assert_eq!(outcome.state.board().total_stones(), TOTAL_STONES);
            state = outcome.state;
        }

        assert!(state.is_over());
        let (a, b) = state.final_scores().unwrap();
        assert_eq!(a as u32 + b as u32, TOTAL_STONES);
        let expected = match a.cmp(&b) {
            std::cmp::Ordering::Greater => GameResult::Winner(Player::A),
            std::cmp::Ordering::Less => GameResult::Winner(Player::B),
            std::cmp::Ordering::Equal => GameResult::Draw,
        };
        assert_eq!(state.result(), expected);
    }
}

#[test]
fn test_opening_extra_turn() {
    let outcome = GameState::new().apply_move(2).unwrap();
    assert_eq!(
        outcome.state.board(),
        &board([4, 4, 0, 5, 5, 5, 1, 4, 4, 4, 4, 4, 4, 0])
    );
    assert!(outcome.extra_turn);
    assert_eq!(outcome.state.current_player(), Player::A);
}

#[test]
fn test_capture_from_adjacent_pit() {
    // Pit 1 is empty, its opposite pit 11 holds 4
    let start = board([3, 0, 5, 5, 5, 5, 1, 4, 4, 4, 4, 4, 4, 0]);
    let mut slots = *start.slots();
    slots[0] = 1;
    slots[6] = 3;
    let state = GameState::from_board(board(slots), Player::A);
    assert_eq!(state.board().total_stones(), TOTAL_STONES);

    let outcome = state.apply_move(0).unwrap();
    assert!(outcome.capture.is_some());
    let after = outcome.state.board();
    assert_eq!(after.get(1), 0);
    assert_eq!(after.get(11), 0);
    assert_eq!(after.store(Player::A), 3 + 1 + 4);
    assert_eq!(after.total_stones(), TOTAL_STONES);
}

#[test]
fn test_terminal_sweep_after_b_move() {
    let state = GameState::from_board(
        board([0, 0, 0, 0, 0, 0, 24, 1, 2, 3, 4, 1, 1, 12]),
        Player::B,
    );
    let outcome = state.apply_move(9).unwrap();

    assert!(outcome.game_over);
    let after = outcome.state.board();
    assert!(after.pits(Player::B).iter().all(|&s| s == 0));
    assert_eq!(after.store(Player::B), 24);
    assert_eq!(after.store(Player::A), 24);
    assert_eq!(outcome.state.result(), GameResult::Draw);
}

#[test]
fn test_rejected_moves_do_not_mutate() {
    let state = GameState::from_board(board([0, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 0]), Player::A);
    let copy = state;

    assert_eq!(state.apply_move(0), Err(MoveError::EmptyPitSelected { pit: 0 }));
    assert!(matches!(
        state.apply_move(12),
        Err(MoveError::InvalidPitOwnership { .. })
    ));
    assert_eq!(state, copy);
}

// ============================================================================
// SEARCH
// ============================================================================

#[test]
fn test_search_never_touches_live_board() {
    let state = GameState::new();
    let snapshot = *state.board();
    let _ = choose_move(state.board(), Player::A, 5);
    assert_eq!(*state.board(), snapshot);
}

#[test]
fn test_pruning_equivalence_on_scattered_boards() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..30 {
        let position = scattered_board(&mut rng);
        for player in [Player::A, Player::B] {
            for depth in [1, 3, 4] {
                let pruned = AlphaBetaAI::new(depth).search(&position, player);
                let full = minimax(&position, player, depth);
                assert_eq!((pruned.pit, pruned.score), (full.pit, full.score));
            }
        }
    }
}

#[test]
fn test_search_determinism() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..10 {
        let position = scattered_board(&mut rng);
        let first = choose_move(&position, Player::B, 5);
        for _ in 0..3 {
            assert_eq!(choose_move(&position, Player::B, 5), first);
        }
    }
}

#[test]
fn test_computer_beats_random_most_of_the_time() {
    let mut wins = 0;
    let games = 10;

    for seed in 0..games {
        let computer_side = if seed % 2 == 0 { Player::A } else { Player::B };
        let mut ai = AlphaBetaAI::new(4);
        let mut random = RandomPlayer::with_seed(seed);
        let mut state = GameState::new();

        while !state.is_over() {
            let player = state.current_player();
            let pit = if player == computer_side {
                ai.best_move(state.board(), player)
            } else {
                random.best_move(&state)
            }
            .unwrap();
            state = state.apply_move(pit).unwrap().state;
        }

        if state.result() == GameResult::Winner(computer_side) {
            wins += 1;
        }
    }

    assert!(wins >= 6, "computer won only {} of {}", wins, games);
}

// ============================================================================
// SESSION AND CONFIG
// ============================================================================

#[test]
fn test_two_player_session() {
    let mut session = GameSession::new(SessionConfig::two_player("Ann", "Bob"));
    assert!(!session.is_computer_turn());

    session.apply_move(0).unwrap();
    assert_eq!(session.current_player_name(), "Bob");
    assert!(!session.is_computer_turn());

    let before = *session.state();
    assert_eq!(
        session.play_computer_turn(),
        Err(MoveError::NotComputerTurn { player: Player::B })
    );
    assert_eq!(*session.state(), before);
    assert!(session.history().iter().all(|m| !m.by_computer));

    let outcome = session.apply_move(8).unwrap();
    assert_eq!(outcome.player, Player::B);
}

#[test]
fn test_config_round_trip() {
    let path = std::env::temp_dir().join(format!("mancala-config-{}.json", std::process::id()));
    let config = SessionConfig {
        player_names: ["Ann".to_string(), "Computer".to_string()],
        mode: GameMode::SinglePlayer {
            computer: Player::A,
        },
        first_player: Player::B,
        search_depth: 4,
    };

    config.save(&path).unwrap();
    let loaded = SessionConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, config);

    let session = GameSession::new(loaded);
    assert_eq!(session.current_player_name(), "Computer");
    assert!(!session.is_computer_turn());
}

#[test]
fn test_invalid_config_file_rejected() {
    let path = std::env::temp_dir().join(format!("mancala-bad-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "search_depth": 0 }"#).unwrap();
    let result = SessionConfig::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());

    assert!(SessionConfig::load(std::path::Path::new("/nonexistent/mancala.json")).is_err());
}
