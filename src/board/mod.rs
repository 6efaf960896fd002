//! Board representation for skill Gomoku

pub mod board;

// Re-exports
pub use board::Board;

use serde::{Deserialize, Serialize};

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Center cell, the canonical opening move
pub const CENTER: Pos = Pos {
    row: (BOARD_SIZE / 2) as u8,
    col: (BOARD_SIZE / 2) as u8,
};

/// Direction vectors for line scanning (4 axes).
/// Scan order matters: the detector reports the first axis that wins.
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Cell state: empty, or occupied by one of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Human,
    Ai,
}

impl Cell {
    /// Get the opposing side
    #[inline]
    pub fn opponent(self) -> Cell {
        match self {
            Cell::Human => Cell::Ai,
            Cell::Ai => Cell::Human,
            Cell::Empty => Cell::Empty,
        }
    }

    /// True for Human or Ai, false for Empty
    #[inline]
    pub fn is_side(self) -> bool {
        self != Cell::Empty
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }
}
