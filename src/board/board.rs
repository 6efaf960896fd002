//! Board grid with whole-board skill mutations

use super::{Cell, Pos, BOARD_SIZE};

/// Game board: a fixed 15x15 matrix of cell states.
///
/// The board carries no legality checks beyond bounds; the orchestrator
/// is responsible for rejecting illegal placements, except where a skill
/// explicitly rewrites occupied cells. `Clone` is cheap and is the
/// intended way to speculate (copy-on-speculate, never mutate-and-revert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get cell state at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Set cell state at position
    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Swap ownership of every piece on the board; empty cells unchanged
    pub fn swap_sides(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = cell.opponent();
            }
        }
    }

    /// All positions held by the given side, in row-major order
    pub fn pieces(&self, side: Cell) -> Vec<Pos> {
        self.positions_where(|c| c == side)
    }

    /// All empty positions, in row-major order
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.positions_where(|c| c == Cell::Empty)
    }

    fn positions_where(&self, pred: impl Fn(Cell) -> bool) -> Vec<Pos> {
        let mut out = Vec::new();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if pred(self.cells[r][c]) {
                    out.push(Pos::new(r as u8, c as u8));
                }
            }
        }
        out
    }

    /// Total pieces on board
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.is_side())
            .count()
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| c.is_side())
    }

    /// Check if no piece has been placed yet
    pub fn is_board_empty(&self) -> bool {
        self.cells.iter().flatten().all(|c| !c.is_side())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
