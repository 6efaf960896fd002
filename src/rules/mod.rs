//! Game rules for skill Gomoku
//!
//! Win condition: five or more same-side pieces in a row along any of
//! the four axes. Draw: every cell occupied (checked only after the
//! win check, since a full board can still contain a winning line).

pub mod win;

// Re-exports for convenient access
pub use win::{check_draw, check_win, scan_winner};
