//! Checkers-Rust: a checkers engine with a text protocol.
//!
//! ## Usage
//!
//! - `checkers-rust` - Show a demo
//! - `checkers-rust play` - Start the text protocol server
//! - `checkers-rust demo` - Watch the AI play itself

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checkers_rust::board::Player;
use checkers_rust::constants::{DEFAULT_PLAYER1_NAME, DEFAULT_PLAYER2_NAME};
use checkers_rust::game::{AiTurn, Game, GameConfig, GameMode, PlayerNames};
use checkers_rust::protocol::ProtocolEngine;

/// Checkers-Rust: a checkers rules engine with a simple AI
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the AI's random choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pause before the AI replies, in milliseconds
    #[arg(long, global = true, default_value_t = 500)]
    ai_delay_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol server on stdin/stdout
    Play {
        /// Two humans instead of human against AI
        #[arg(long)]
        multiplayer: bool,
        /// Name of Player 1
        #[arg(long, default_value = DEFAULT_PLAYER1_NAME)]
        name: String,
        /// Name of Player 2
        #[arg(long, default_value = DEFAULT_PLAYER2_NAME)]
        opponent: String,
    },
    /// Let the AI play both sides
    Demo {
        /// Stop after this many turns
        #[arg(long, default_value_t = 200)]
        max_turns: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GameConfig {
        ai_delay: Duration::from_millis(cli.ai_delay_ms),
        seed: cli.seed,
        ..GameConfig::default()
    };

    match cli.command {
        Some(Commands::Play {
            multiplayer,
            name,
            opponent,
        }) => {
            let mode = if multiplayer {
                GameMode::Multiplayer
            } else {
                GameMode::VersusAi
            };
            let game = Game::new(mode, PlayerNames::new(&name, &opponent), config);
            let mut engine = ProtocolEngine::with_game(game);
            engine
                .run(io::stdin().lock(), io::stdout())
                .context("protocol server failed")?;
        }
        Some(Commands::Demo { max_turns }) => run_demo(config, max_turns)?,
        None => run_demo(config, 200)?,
    }
    Ok(())
}

fn run_demo(config: GameConfig, max_turns: usize) -> Result<()> {
    println!("Checkers-Rust: AI self-play\n");

    let names = PlayerNames::new("White", "Black");
    let mut game = Game::new(GameMode::Multiplayer, names, config);
    println!("{}", game.board());

    for turn in 1..=max_turns {
        let player = game.turn_owner();
        let played = game
            .play_turn_for_current()
            .with_context(|| format!("turn {turn} failed"))?;
        match played {
            AiTurn::Played(reports) => {
                let moves: Vec<String> = reports.iter().map(|r| r.mv.to_string()).collect();
                println!("{turn:>3}. {player}: {}", moves.join(" "));
            }
            AiTurn::NoMove => println!("{turn:>3}. {player}: no move"),
        }
        if game.outcome().is_some() {
            break;
        }
    }

    println!("\n{}", game.board());
    println!("{}", game.score_line(Player::One));
    println!("{}", game.score_line(Player::Two));
    match game.outcome_message() {
        Some(message) => println!("{message}"),
        None => println!("No result after {max_turns} turns"),
    }
    Ok(())
}
