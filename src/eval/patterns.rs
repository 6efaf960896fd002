//! Pattern scores for candidate-cell evaluation
//!
//! A run is scored by its length-if-placed and how many of its two
//! ends are still open (in-bounds and empty).

/// Per-axis pattern scores
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - completing move
    pub const FIVE: i32 = 100_000;
    /// Four with both ends open
    pub const OPEN_FOUR: i32 = 10_000;
    /// Four with one open end
    pub const CLOSED_FOUR: i32 = 1_000;
    /// Three with both ends open
    pub const OPEN_THREE: i32 = 1_000;
    /// Three with one open end
    pub const CLOSED_THREE: i32 = 100;
    /// Two with both ends open
    pub const OPEN_TWO: i32 = 10;
    /// Two with one open end
    pub const CLOSED_TWO: i32 = 1;

    /// Score one axis by run length and open ends
    pub fn for_run(consecutive: i32, open_ends: i32) -> i32 {
        match (consecutive, open_ends) {
            (5.., _) => Self::FIVE,
            (4, 2) => Self::OPEN_FOUR,
            (4, _) => Self::CLOSED_FOUR,
            (3, 2) => Self::OPEN_THREE,
            (3, _) => Self::CLOSED_THREE,
            (2, 2) => Self::OPEN_TWO,
            (2, _) => Self::CLOSED_TWO,
            _ => 0,
        }
    }
}
