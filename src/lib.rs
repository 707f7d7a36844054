//! Checkers-Rust: a checkers (draughts) rules engine with a simple AI.
//!
//! The crate holds the game rules and turn management; rendering and menus
//! are left to whatever drives it.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, pacing, and defaults
//! - [`board`] - Players, pieces, squares, and the 8x8 grid
//! - [`rules`] - Legal move generation and mandatory captures
//! - [`executor`] - Applying moves: captures, crowning, chains
//! - [`outcome`] - Win and draw detection
//! - [`ai`] - Greedy capture-first AI with random fallback
//! - [`schedule`] - Deferred AI move
//! - [`game`] - Turn controller and presentation-facing interface
//! - [`protocol`] - Text protocol for driving a game over stdin/stdout
//! - [`error`] - Rejection reasons and parse errors
//!
//! ## Example
//!
//! ```
//! use checkers_rust::game::{Destination, Game, GameConfig, GameMode, PlayerNames};
//!
//! let mut game = Game::new(GameMode::Multiplayer, PlayerNames::default(), GameConfig::default());
//! game.submit_selection(5, 0).unwrap();
//! let moved = game.submit_destination(4, 1).unwrap();
//! assert!(matches!(moved, Destination::Moved(_)));
//! println!("{}", game.board());
//! ```

pub mod ai;
pub mod board;
pub mod constants;
pub mod error;
pub mod executor;
pub mod game;
pub mod outcome;
pub mod protocol;
pub mod rules;
pub mod schedule;
