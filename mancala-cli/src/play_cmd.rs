//! Play command - interactive game on the terminal
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play_session()
//! - Level 3: human_turn(), computer_turn(), report_outcome()

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use mancala_core::{
    GameMode, GameResult, GameSession, MoveError, MoveOutcome, Player, SessionConfig,
    MAX_SEARCH_DEPTH,
};

use crate::render::{pit_index, pit_number, render_board};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Session config JSON file (flags below override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Two humans instead of human vs computer
    #[arg(long)]
    pub two_player: bool,

    /// Name of the first human
    #[arg(long)]
    pub name: Option<String>,

    /// Name of the second player (human or computer)
    #[arg(long)]
    pub opponent: Option<String>,

    /// Computer search depth in plies (1-12)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SEARCH_DEPTH as i64))]
    pub depth: Option<u32>,

    /// Side that moves first (a or b)
    #[arg(long)]
    pub first: Option<Player>,

    /// Side the computer plays (a or b)
    #[arg(long)]
    pub computer: Option<Player>,
}

/// What the human typed
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Pit(usize),
    Quit,
    Invalid(String),
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: PlayArgs) -> Result<()> {
    let config = build_config(&args)?;
    let mut session = GameSession::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    play_session(&mut session, &mut stdin.lock(), &mut stdout.lock())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &PlayArgs) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    if args.two_player {
        config.mode = GameMode::TwoPlayer;
        if args.opponent.is_none() && config.player_names[1] == "AI" {
            config.player_names[1] = "Player 2".to_string();
        }
    }
    if let Some(computer) = args.computer {
        config.mode = GameMode::SinglePlayer { computer };
    }
    if let Some(name) = &args.name {
        let human = config.mode.computer().map_or(Player::A, Player::opponent);
        config.player_names[human.index()] = name.clone();
    }
    if let Some(opponent) = &args.opponent {
        let other = config.mode.computer().unwrap_or(Player::B);
        config.player_names[other.index()] = opponent.clone();
    }
    if let Some(depth) = args.depth {
        config.search_depth = depth;
    }
    if let Some(first) = args.first {
        config.first_player = first;
    }

    config.validate()?;
    Ok(config)
}

/// Drive the game until it ends or the input runs out
fn play_session<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "{}", render_board(session.state().board(), &session.config().player_names))?;

    while !session.is_over() {
        let outcome = if session.is_computer_turn() {
            computer_turn(session, output)?
        } else {
            match human_turn(session, input, output)? {
                Some(outcome) => outcome,
                None => {
                    writeln!(output, "Goodbye!")?;
                    return Ok(());
                }
            }
        };
        report_outcome(session, &outcome, output)?;
    }

    announce_result(session, output)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Prompt until the human enters an accepted move. `None` on quit or EOF.
fn human_turn<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: &mut R,
    output: &mut W,
) -> Result<Option<MoveOutcome>> {
    let player = session.current_player();
    loop {
        write!(output, "{} ({}), choose a pit 1-6: ", session.current_player_name(), player)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let pit = match parse_input(&line) {
            Input::Quit => return Ok(None),
            Input::Invalid(text) => {
                writeln!(output, "'{}' is not a pit number, enter 1-6 or q to quit.", text)?;
                continue;
            }
            Input::Pit(number) => match pit_index(player, number) {
                Some(pit) => pit,
                None => {
                    writeln!(output, "Please choose a pit from your side (1-6).")?;
                    continue;
                }
            },
        };

        match session.apply_move(pit) {
            Ok(outcome) => return Ok(Some(outcome)),
            Err(err) if err.is_retryable() => {
                writeln!(output, "{}", retry_message(&err))?;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn computer_turn<W: Write>(session: &mut GameSession, output: &mut W) -> Result<MoveOutcome> {
    let name = session.current_player_name().to_string();
    let outcome = session.play_computer_turn()?;
    writeln!(output, "{} plays pit {}.", name, pit_number(outcome.pit))?;
    Ok(outcome)
}

fn report_outcome<W: Write>(
    session: &GameSession,
    outcome: &MoveOutcome,
    output: &mut W,
) -> Result<()> {
    if let Some(capture) = outcome.capture {
        writeln!(output, "Captured {} stones!", capture.stones)?;
    }
    if let Some(sweep) = outcome.sweep {
        writeln!(
            output,
            "{} collects the last {} stones.",
            session.config().name(sweep.player),
            sweep.stones
        )?;
    }

    writeln!(output)?;
    writeln!(output, "{}", render_board(outcome.state.board(), &session.config().player_names))?;

    if !outcome.game_over {
        if outcome.extra_turn {
            writeln!(output, "{} gets another turn!", session.current_player_name())?;
        } else {
            writeln!(output, "{}'s turn.", session.current_player_name())?;
        }
    }
    Ok(())
}

fn announce_result<W: Write>(session: &GameSession, output: &mut W) -> Result<()> {
    let (a, b) = session.state().final_scores().unwrap_or_default();
    writeln!(
        output,
        "Game over: {} {} - {} {}",
        session.config().name(Player::A),
        a,
        b,
        session.config().name(Player::B)
    )?;

    match (session.result(), session.winner_name()) {
        (GameResult::Winner(_), Some(name)) => writeln!(output, "{} wins!", name)?,
        _ => writeln!(output, "It's a tie!")?,
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_input(line: &str) -> Input {
    let text = line.trim();
    if text.eq_ignore_ascii_case("q") || text.eq_ignore_ascii_case("quit") {
        return Input::Quit;
    }
    match text.parse::<usize>() {
        Ok(number) => Input::Pit(number),
        Err(_) => Input::Invalid(text.to_string()),
    }
}

fn retry_message(err: &MoveError) -> String {
    match err {
        MoveError::EmptyPitSelected { .. } => "This pit is empty. Choose another pit.".to_string(),
        other => format!("{}. Choose another pit.", other),
    }
}

// ============================================================================
// TESTS
// ============================================================================
