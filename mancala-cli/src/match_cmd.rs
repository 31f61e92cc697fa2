//! Match command - computer player against a baseline opponent
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::{Args, ValueEnum};

use mancala_core::{
    AlphaBetaAI, GameResult, GameState, MoveError, Player, RandomPlayer, MAX_SEARCH_DEPTH,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    /// Uniformly random legal pits
    Random,
    /// Another alpha-beta player
    Alphabeta,
}

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play (will alternate sides)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Search depth of the computer player (1-12)
    #[arg(
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=MAX_SEARCH_DEPTH as i64)
    )]
    pub depth: u32,

    /// Baseline opponent
    #[arg(long, value_enum, default_value = "random")]
    pub opponent: OpponentKind,

    /// Search depth of an alpha-beta opponent (1-12)
    #[arg(
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(1..=MAX_SEARCH_DEPTH as i64)
    )]
    pub opponent_depth: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Baseline the computer player is measured against
enum Opponent {
    Random(RandomPlayer),
    AlphaBeta(AlphaBetaAI),
}

impl Opponent {
    fn best_move(&mut self, state: &GameState) -> Option<usize> {
        match self {
            Opponent::Random(player) => player.best_move(state),
            Opponent::AlphaBeta(ai) => ai.best_move(state.board(), state.current_player()),
        }
    }
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    computer_side: Player,
    result: GameResult,
    computer_store: u8,
    opponent_store: u8,
    moves: usize,
}

impl GameRecord {
    fn computer_won(&self) -> bool {
        self.result == GameResult::Winner(self.computer_side)
    }

    fn opponent_won(&self) -> bool {
        self.result == GameResult::Winner(self.computer_side.opponent())
    }
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    computer_wins: usize,
    opponent_wins: usize,
    draws: usize,
    avg_margin: f32,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting match: depth {} vs {:?} ({} games)",
        args.depth,
        args.opponent,
        args.games
    );

    let results = play_match(&args, seed)?;
    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_match(args: &MatchArgs, seed: Option<u64>) -> Result<MatchResults> {
    let mut computer = AlphaBetaAI::new(args.depth);
    let mut opponent = create_opponent(args, seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        // Alternate sides; A always moves first
        let computer_side = if game_num % 2 == 0 { Player::A } else { Player::B };
        let record = play_single_game(&mut computer, &mut opponent, computer_side, game_num + 1)?;

        tracing::info!(
            "Game {}: {:?} ({} - {}, {} moves)",
            record.game_number,
            record.result,
            record.computer_store,
            record.opponent_store,
            record.moves
        );

        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(
    computer: &mut AlphaBetaAI,
    opponent: &mut Opponent,
    computer_side: Player,
    game_number: usize,
) -> Result<GameRecord> {
    let mut state = GameState::new();
    let mut moves = 0;

    while !state.is_over() {
        let player = state.current_player();
        let pit = if player == computer_side {
            computer.best_move(state.board(), player)
        } else {
            opponent.best_move(&state)
        }
        .ok_or(MoveError::NoLegalMove { player })?;

        state = state.apply_move(pit)?.state;
        moves += 1;
    }

    let board = state.board();
    Ok(GameRecord {
        game_number,
        computer_side,
        result: state.result(),
        computer_store: board.store(computer_side),
        opponent_store: board.store(computer_side.opponent()),
        moves,
    })
}

fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let computer_wins = games.iter().filter(|g| g.computer_won()).count();
    let opponent_wins = games.iter().filter(|g| g.opponent_won()).count();
    let draws = games.len() - computer_wins - opponent_wins;

    let (avg_margin, avg_moves) = if games.is_empty() {
        (0.0, 0.0)
    } else {
        let total_margin: i32 = games
            .iter()
            .map(|g| g.computer_store as i32 - g.opponent_store as i32)
            .sum();
        let total_moves: usize = games.iter().map(|g| g.moves).sum();
        (
            total_margin as f32 / games.len() as f32,
            total_moves as f32 / games.len() as f32,
        )
    };

    MatchResults {
        games,
        computer_wins,
        opponent_wins,
        draws,
        avg_margin,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_opponent(args: &MatchArgs, seed: Option<u64>) -> Opponent {
    match args.opponent {
        OpponentKind::Random => Opponent::Random(match seed {
            Some(s) => RandomPlayer::with_seed(s),
            None => RandomPlayer::from_entropy(),
        }),
        OpponentKind::Alphabeta => Opponent::AlphaBeta(AlphaBetaAI::new(args.opponent_depth)),
    }
}

fn rate(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        computer_side: Player,
        result: GameResult,
        computer_store: u8,
        opponent_store: u8,
        moves: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        computer_wins: usize,
        opponent_wins: usize,
        draws: usize,
        computer_win_rate: f32,
        avg_margin: f32,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        computer_wins: results.computer_wins,
        opponent_wins: results.opponent_wins,
        draws: results.draws,
        computer_win_rate: rate(results.computer_wins, total),
        avg_margin: results.avg_margin,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                computer_side: g.computer_side,
                result: g.result,
                computer_store: g.computer_store,
                opponent_store: g.opponent_store,
                moves: g.moves,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games:    {}", total);
    println!(
        "Computer wins:  {} ({:.1}%)",
        results.computer_wins,
        rate(results.computer_wins, total) * 100.0
    );
    println!(
        "Opponent wins:  {} ({:.1}%)",
        results.opponent_wins,
        rate(results.opponent_wins, total) * 100.0
    );
    println!(
        "Draws:          {} ({:.1}%)",
        results.draws,
        rate(results.draws, total) * 100.0
    );
    println!("Avg margin:     {:+.1}", results.avg_margin);
    println!("Avg moves:      {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: computer as {} {:?}, {} - {} in {} moves",
            game.game_number,
            game.computer_side,
            game.result,
            game.computer_store,
            game.opponent_store,
            game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        args: MatchArgs,
    }

    fn record(side: Player, result: GameResult, computer: u8, opponent: u8) -> GameRecord {
        GameRecord {
            game_number: 1,
            computer_side: side,
            result,
            computer_store: computer,
            opponent_store: opponent,
            moves: 30,
        }
    }

    #[test]
    fn test_depth_bounds() {
        let cli = Cli::try_parse_from(["match"]).unwrap();
        assert_eq!(cli.args.depth, 5);
        assert_eq!(cli.args.opponent_depth, 1);
        assert_eq!(cli.args.opponent, OpponentKind::Random);

        assert!(Cli::try_parse_from(["match", "--depth", "12"]).is_ok());
        assert!(Cli::try_parse_from(["match", "--depth", "13"]).is_err());
        assert!(Cli::try_parse_from(["match", "--depth", "30"]).is_err());
        assert!(Cli::try_parse_from(["match", "--opponent-depth", "13"]).is_err());
        assert!(Cli::try_parse_from(["match", "--opponent-depth", "0"]).is_err());
    }

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(vec![]);
        assert_eq!(results.computer_wins, 0);
        assert_eq!(results.opponent_wins, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_margin, 0.0);
    }

    #[test]
    fn test_compute_match_statistics() {
        let games = vec![
            record(Player::A, GameResult::Winner(Player::A), 30, 18),
            record(Player::B, GameResult::Winner(Player::A), 20, 28),
            record(Player::B, GameResult::Winner(Player::B), 26, 22),
            record(Player::A, GameResult::Draw, 24, 24),
        ];

        let results = compute_match_statistics(games);
        assert_eq!(results.computer_wins, 2);
        assert_eq!(results.opponent_wins, 1);
        assert_eq!(results.draws, 1);
        assert_eq!(results.avg_margin, 2.0);
        assert_eq!(results.avg_moves, 30.0);
    }

    #[test]
    fn test_single_game_conserves_stones() {
        let mut computer = AlphaBetaAI::new(3);
        let mut opponent = Opponent::Random(RandomPlayer::with_seed(5));

        for side in [Player::A, Player::B] {
            let record = play_single_game(&mut computer, &mut opponent, side, 1).unwrap();
            assert_ne!(record.result, GameResult::Ongoing);
            assert_eq!(record.computer_store as u32 + record.opponent_store as u32, 48);
            assert!(record.moves > 0);
        }
    }

    #[test]
    fn test_alpha_beta_opponent() {
        let mut computer = AlphaBetaAI::new(2);
        let mut opponent = Opponent::AlphaBeta(AlphaBetaAI::new(1));
        let record = play_single_game(&mut computer, &mut opponent, Player::B, 1).unwrap();
        assert_ne!(record.result, GameResult::Ongoing);
    }
}
