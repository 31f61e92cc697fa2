//! Suggest command - run the computer player on a given position

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use mancala_core::{
    minimax, AlphaBetaAI, Board, Player, SearchResult, DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH,
};

use crate::render::pit_number;

#[derive(Args)]
pub struct SuggestArgs {
    /// Fourteen slot counts, pits 0-5, store A, pits 7-12, store B
    #[arg(long, default_value = "4,4,4,4,4,4,0,4,4,4,4,4,4,0")]
    pub board: String,

    /// Side to move (a or b)
    #[arg(long, default_value = "a")]
    pub player: Player,

    /// Search depth in plies (1-12)
    #[arg(
        long,
        default_value_t = DEFAULT_SEARCH_DEPTH,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SEARCH_DEPTH as i64)
    )]
    pub depth: u32,

    /// Search without pruning
    #[arg(long)]
    pub exhaustive: bool,

    /// Split the root across threads
    #[cfg(feature = "parallel")]
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Suggestion {
    board: Board,
    player: Player,
    depth: u32,
    pit: Option<usize>,
    pit_number: Option<usize>,
    score: i32,
    nodes: u64,
}

pub fn run(args: SuggestArgs) -> Result<()> {
    let board: Board = args
        .board
        .parse()
        .with_context(|| format!("Invalid board: {}", args.board))?;

    let result = search(&board, &args);
    tracing::info!(nodes = result.nodes, "search complete");

    let suggestion = Suggestion {
        board,
        player: args.player,
        depth: args.depth,
        pit: result.pit,
        pit_number: result.pit.map(pit_number),
        score: result.score,
        nodes: result.nodes,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestion)?);
    } else {
        print_text(&suggestion);
    }
    Ok(())
}

fn search(board: &Board, args: &SuggestArgs) -> SearchResult {
    #[cfg(feature = "parallel")]
    if args.parallel {
        return mancala_core::parallel_search(board, args.player, args.depth);
    }

    if args.exhaustive {
        minimax(board, args.player, args.depth)
    } else {
        AlphaBetaAI::new(args.depth).search(board, args.player)
    }
}

fn print_text(suggestion: &Suggestion) {
    match (suggestion.pit, suggestion.pit_number) {
        (Some(pit), Some(number)) => println!(
            "Player {} should play pit {} (index {}), score {:+}",
            suggestion.player, number, pit, suggestion.score
        ),
        _ => println!("Player {} has no legal move", suggestion.player),
    }
    println!("Nodes searched: {}", suggestion.nodes);
}
