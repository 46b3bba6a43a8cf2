//! Go-Opponent: a Go rules engine with a heuristic opponent.
//!
//! ## Usage
//!
//! - `go-opponent` - Show a self-play demo
//! - `go-opponent gtp` - Start GTP server for GUI integration
//! - `go-opponent demo` - Let the opponent play against itself
//!
//! Logs go to stderr; set `RUST_LOG` to change the filter.

use std::time::Duration;

use anyhow::{Context, ensure};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use go_opponent::constants::{DEFAULT_BOARD_SIZE, MAX_GTP_BOARD_SIZE};
use go_opponent::difficulty::Difficulty;
use go_opponent::gtp::{GtpEngine, format_vertex};
use go_opponent::session::Session;

/// Go-Opponent: a Go engine with a heuristic automated opponent
#[derive(Parser)]
#[command(name = "go-opponent")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Board size
    #[arg(long, global = true, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Opponent strength: easy, medium or hard
    #[arg(long, global = true, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Seed for reproducible opponent moves
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Give up on an opponent move (and pass) after this many milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Let the opponent play a game against itself
    Demo,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "go_opponent=info".into()),
        )
        .init();

    let cli = Cli::parse();
    ensure!(
        (1..=MAX_GTP_BOARD_SIZE).contains(&cli.size),
        "board size must be between 1 and {MAX_GTP_BOARD_SIZE}, got {}",
        cli.size
    );

    let mut session = Session::new(cli.size, cli.difficulty);
    if let Some(seed) = cli.seed {
        session = session.with_seed(seed);
    }
    if let Some(ms) = cli.timeout_ms {
        session = session.with_timeout(Duration::from_millis(ms));
    }

    match cli.command {
        Some(Commands::Gtp) => {
            let mut engine = GtpEngine::new(session);
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Demo) | None => run_demo(session),
    }
    Ok(())
}

fn run_demo(mut session: Session) {
    let size = session.position().size();
    println!(
        "Go-Opponent: {size}x{size} self-play at {} difficulty\n",
        session.difficulty()
    );

    // Passing ends the game quickly once the board fills up; the cap only
    // guards against endless ko fights.
    let max_turns = size * size * 2;
    for turn in 1..=max_turns {
        let player = session.position().to_move();
        let outcome = session.ai_move();
        if outcome.message.is_some() {
            break;
        }
        match outcome.played {
            Some(pt) => {
                let vertex = format_vertex(pt, size).unwrap_or_else(|| format!("{pt:?}"));
                println!("{turn:>3}. {player}: {vertex}");
            }
            None => println!("{turn:>3}. {player}: pass"),
        }
        if session.position().is_ended() {
            break;
        }
    }

    let pos = session.position();
    println!("\n{}", pos.board());
    let captures = pos.captures();
    println!(
        "Captures: Black {}, White {}",
        captures.black, captures.white
    );
    if pos.is_ended() {
        println!("Game over after {} turns", pos.move_count());
    }
}
