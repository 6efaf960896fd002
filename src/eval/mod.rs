//! Move evaluation and selection for the computer opponent
//!
//! One-ply greedy only: immediate win, immediate block, then an
//! additive positional heuristic. No deep search.

pub mod heuristic;
pub mod patterns;

// Re-exports
pub use heuristic::{evaluate_position, find_best_move};
pub use patterns::PatternScore;
