//! Console tic-tac-toe against the minimax AI.
//!
//! Run with `cargo run --example tic_tac_toe`, or add `-- --self-play 100 --seed 7` to watch
//! the AI play a random opponent. Set `RUST_LOG=ttt_minimax=debug` to see the searches.

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ttt_minimax::random::{
    RandomGenerator, SeededRandomGenerator, StandardRandomGenerator, random_move,
};
use ttt_minimax::{GameState, Marker, MinimaxSearch, Move, ScoreTally, TicTacToeBoard};

/// Play tic-tac-toe against a minimax AI
#[derive(Parser, Debug)]
#[command(name = "tic_tac_toe")]
#[command(version)]
struct Cli {
    /// Let the AI open every game
    #[arg(long)]
    ai_first: bool,

    /// Instead of reading moves from stdin, play this many games against a random opponent
    #[arg(long)]
    self_play: Option<u32>,

    /// Seed for the random opponent; without it every run differs
    #[arg(long)]
    seed: Option<i64>,

    /// Print the line of play the AI expects after each of its moves
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut search = MinimaxSearch::builder()
        .with_tree_recording(cli.trace)
        .build();

    match (cli.self_play, cli.seed) {
        (Some(games), Some(seed)) => {
            let rng = SeededRandomGenerator::new(seed);
            let tally = self_play(&mut search, games, cli.ai_first, rng);
            println!("{tally}");
        }
        (Some(games), None) => {
            let tally = self_play(&mut search, games, cli.ai_first, StandardRandomGenerator);
            println!("{tally}");
        }
        (None, _) => play_interactive(&mut search, cli.ai_first, cli.trace)?,
    }
    Ok(())
}

/// Plays `games` games between the AI and a random opponent. `ai_first` picks the opener
/// of every game.
fn self_play<R: RandomGenerator>(
    search: &mut MinimaxSearch<TicTacToeBoard>,
    games: u32,
    ai_first: bool,
    mut rng: R,
) -> ScoreTally {
    let mut tally = ScoreTally::new();
    for game in 0..games {
        let mut board = TicTacToeBoard::new();
        let mut marker = if ai_first { Marker::Ai } else { Marker::Human };
        while !board.is_terminal() {
            let mv = match marker {
                Marker::Human => random_move(&board, &mut rng),
                Marker::Ai => search.choose_move(&board).best_move,
            };
            let Some(mv) = mv else { break };
            board.apply_move(mv, marker);
            marker = marker.opponent();
        }
        info!(game, state = ?board.state(), "self-play game finished");
        tally.record(board.state());
    }
    tally
}

fn play_interactive(
    search: &mut MinimaxSearch<TicTacToeBoard>,
    ai_first: bool,
    trace: bool,
) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut tally = ScoreTally::new();
    let mut board = TicTacToeBoard::new();
    let mut to_move = if ai_first { Marker::Ai } else { Marker::Human };

    println!("You are X. Enter moves as `row col` (0-2), `r` to reset the score, `q` to quit.");
    loop {
        if to_move == Marker::Ai {
            let result = search.choose_move(&board);
            if let Some(reply) = result.best_move {
                board.apply_move(reply, Marker::Ai);
                println!("AI plays {reply} (score {})", result.score);
                if trace {
                    let line: Vec<String> =
                        search.principal_variation().iter().map(Move::to_string).collect();
                    println!("  expected line: {}", line.join(" "));
                }
            }
            to_move = Marker::Human;
        } else {
            println!("\n{board}\n");
            print!("Your move: ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            match line.trim() {
                "q" => return Ok(()),
                "r" => {
                    tally.reset();
                    println!("Score reset. {tally}");
                    continue;
                }
                input => {
                    let Some((row, col)) = parse_coordinates(input) else {
                        println!("Enter a row and a column, e.g. `0 2`.");
                        continue;
                    };
                    if let Err(err) = Move::new(row, col)
                        .and_then(|mv| board.try_apply_move(mv, Marker::Human))
                    {
                        println!("Invalid move: {err}");
                        continue;
                    }
                    to_move = Marker::Ai;
                }
            }
        }

        let state = board.state();
        if state.is_over() {
            println!("\n{board}\n");
            println!(
                "{}",
                match state {
                    GameState::PlayerWin => "You win!",
                    GameState::AiWin => "You lose!",
                    _ => "It's a draw!",
                }
            );
            tally.record(state);
            println!("Score - {tally}");
            board.clear_all();
            to_move = if ai_first { Marker::Ai } else { Marker::Human };
        }
    }
}

fn parse_coordinates(input: &str) -> Option<(u8, u8)> {
    let mut parts = input.split_whitespace().map(str::parse::<u8>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(row)), Some(Ok(col)), None) => Some((row, col)),
        _ => None,
    }
}
