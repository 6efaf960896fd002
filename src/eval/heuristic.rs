//! Greedy move selection for the computer opponent
//!
//! Selection priority:
//! 1. Opening: the exact center cell on an empty board
//! 2. Immediate win: any cell completing five for the computer
//! 3. Immediate block: any cell completing five for the human
//! 4. Heuristic: highest additive self + opponent pattern score
//!
//! Win/block probes run on a cloned board so speculation never leaks
//! into the live position.

use crate::board::{Board, Cell, Pos, CENTER, DIRECTIONS};
use crate::rules::check_win;

use super::patterns::PatternScore;

/// Pick the computer's placement for its normal (non-skill) move.
///
/// Returns `None` only when the board has no empty cell left.
/// All scans run in row-major order and ties keep the first candidate,
/// so the choice is fully deterministic for a given position.
#[must_use]
pub fn find_best_move(board: &Board) -> Option<Pos> {
    let empty_cells = board.empty_cells();
    if empty_cells.is_empty() {
        return None;
    }
    if board.is_board_empty() {
        return Some(CENTER);
    }

    // Immediate win
    if let Some(pos) = find_completing_move(board, &empty_cells, Cell::Ai) {
        return Some(pos);
    }

    // Immediate block: the human's completing cell is our move
    if let Some(pos) = find_completing_move(board, &empty_cells, Cell::Human) {
        return Some(pos);
    }

    // Heuristic: score each candidate for both sides at once, which
    // makes the pick offense- and defense-aware without extra weights
    let mut best_score = i32::MIN;
    let mut best = empty_cells[0];
    for &pos in &empty_cells {
        let score =
            evaluate_position(board, pos, Cell::Ai) + evaluate_position(board, pos, Cell::Human);
        if score > best_score {
            best_score = score;
            best = pos;
        }
    }
    Some(best)
}

/// First empty cell (row-major) where placing `side` completes five
fn find_completing_move(board: &Board, empty_cells: &[Pos], side: Cell) -> Option<Pos> {
    for &pos in empty_cells {
        let mut probe = board.clone();
        probe.set(pos, side);
        if check_win(&probe, pos).is_some() {
            return Some(pos);
        }
    }
    None
}

/// Score a candidate cell for one side, as if that side occupied it.
///
/// For each axis: count the run the placement would join (walking up
/// to four cells each way), counting an end as open when the cell just
/// past the run is in-bounds and empty. Each axis contributes a
/// [`PatternScore`] and the four are summed.
#[must_use]
pub fn evaluate_position(board: &Board, pos: Pos, side: Cell) -> i32 {
    let mut score = 0;

    for &(dr, dc) in &DIRECTIONS {
        let mut consecutive = 1;
        let mut open_ends = 0;

        for sign in [1, -1] {
            for i in 1..5 {
                let r = i32::from(pos.row) + dr * i * sign;
                let c = i32::from(pos.col) + dc * i * sign;
                if !Pos::is_valid(r, c) {
                    break;
                }
                match board.get(Pos::new(r as u8, c as u8)) {
                    s if s == side => consecutive += 1,
                    Cell::Empty => {
                        open_ends += 1;
                        break;
                    }
                    _ => break,
                }
            }
        }

        score += PatternScore::for_run(consecutive, open_ends);
    }

    score
}
