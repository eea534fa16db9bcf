//! Cylinder checkers: a checkers variant on an 8x8 board whose columns wrap.
//!
//! This crate provides the rules engine (steps, jumps, mandatory capture,
//! promotion, game-end detection) and a one-ply heuristic opponent.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, starting layout, evaluation weights
//! - [`piece`] - Sides, ranks, and direction tables
//! - [`board`] - Board state, wrap-aware geometry, jumps, game status
//! - [`game`] - Turn engine: validates and plays moves, promotes, passes the turn
//! - [`eval`] - Static evaluation of a position
//! - [`history`] - Position keys and repetition history
//! - [`selector`] - One-ply move selection with random tie-breaks
//! - [`selfplay`] - Engine-vs-engine games
//! - [`console`] - Text front end
//!
//! ## Example
//!
//! ```
//! use cylinder_checkers::game::Game;
//! use cylinder_checkers::board::GameStatus;
//!
//! // White moves first
//! let mut game = Game::with_seed(1);
//! game.play_turn(1, 0, 2, 1).unwrap();
//!
//! // Let the engine answer for Black
//! let reply = game.play_ai_turn().unwrap();
//! assert!(reply.is_some());
//! assert_eq!(game.check_game_status(), GameStatus::Continue);
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod eval;
pub mod game;
pub mod history;
pub mod piece;
pub mod selector;
pub mod selfplay;
