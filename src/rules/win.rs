//! Win and draw detection
//!
//! `check_win` scans outward from a just-occupied cell; `scan_winner`
//! re-evaluates the whole board after skill effects (swap, relocation)
//! where no single freshly-placed cell exists.

use crate::board::{Board, Cell, Pos, BOARD_SIZE, DIRECTIONS};

/// Check for a winning line through the given cell.
///
/// The owning side is read from the cell itself; returns `None` if the
/// cell is empty. Axes are scanned in `DIRECTIONS` order (horizontal
/// first) and the first axis reaching five wins. The returned line
/// holds every contiguous piece on that axis — an overline of six or
/// more is returned whole, never truncated. Order of positions follows
/// the scan: queried cell, forward run, then backward run.
pub fn check_win(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let side = board.get(pos);
    if !side.is_side() {
        return None;
    }

    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![pos];

        // Forward
        for i in 1..5 {
            let r = i32::from(pos.row) + dr * i;
            let c = i32::from(pos.col) + dc * i;
            if !Pos::is_valid(r, c) {
                break;
            }
            let next = Pos::new(r as u8, c as u8);
            if board.get(next) == side {
                line.push(next);
            } else {
                break;
            }
        }

        // Backward
        for i in 1..5 {
            let r = i32::from(pos.row) - dr * i;
            let c = i32::from(pos.col) - dc * i;
            if !Pos::is_valid(r, c) {
                break;
            }
            let prev = Pos::new(r as u8, c as u8);
            if board.get(prev) == side {
                line.push(prev);
            } else {
                break;
            }
        }

        if line.len() >= 5 {
            return Some(line);
        }
    }

    None
}

/// Check for a draw: true iff no empty cell remains.
///
/// Callers must check for a win first; a full board can still hold a
/// winning line.
pub fn check_draw(board: &Board) -> bool {
    board.is_full()
}

/// Scan the whole board for a winner, either side.
///
/// Row-major scan over occupied cells; the first winning line found
/// decides. Used after skill effects that rewrite cells wholesale.
pub fn scan_winner(board: &Board) -> Option<(Cell, Vec<Pos>)> {
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let pos = Pos::new(r as u8, c as u8);
            if board.get(pos).is_side() {
                if let Some(line) = check_win(board, pos) {
                    return Some((board.get(pos), line));
                }
            }
        }
    }
    None
}
