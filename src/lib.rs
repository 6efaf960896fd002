//! Skill Gomoku rules engine
//!
//! A single-player Gomoku (five-in-a-row) core on a 15x15 board where
//! the human plays against a built-in computer opponent, plus a skill
//! system: placements earn score, and score buys skills that bend the
//! rules — removing, relocating, or mass-clearing pieces, swapping
//! ownership of the whole board, skipping the opponent, or winning
//! outright.
//!
//! # Architecture
//!
//! - [`board`]: Board representation and coordinates
//! - [`rules`]: Win and draw detection
//! - [`eval`]: Position evaluation and the computer's move heuristic
//! - [`skills`]: Skill catalog and the targeted-skill state machine
//! - [`engine`]: The computer's probabilistic skill decision
//! - [`game`]: The orchestrator tying everything together
//!
//! # Quick Start
//!
//! ```
//! use skill_gomoku::{Cell, Game, GameStatus, Pos};
//!
//! let mut game = Game::with_seed(7);
//!
//! // The human opens; placement earns one point
//! game.place_piece(Pos::new(7, 7)).unwrap();
//! assert_eq!(game.score(Cell::Human), 1);
//!
//! // The computer takes its full turn in one call
//! while game.turn() == Cell::Ai && game.status() == GameStatus::Playing {
//!     game.play_ai_turn().unwrap();
//! }
//! assert_eq!(game.turn(), Cell::Human);
//! ```
//!
//! All commands are synchronous and run to completion, win and draw
//! detection included. The presentation layer reads results back
//! through accessors and the event queue ([`Game::drain_events`]).

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod skills;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Pos, BOARD_SIZE, CENTER};
pub use error::GameError;
pub use eval::{evaluate_position, find_best_move};
pub use game::{Game, GameEvent, GameStatus};
pub use skills::{Skill, SkillId, SkillState, CATALOG};
