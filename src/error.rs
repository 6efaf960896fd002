//! Error taxonomy for rejected commands
//!
//! Every variant is recoverable: the orchestrator refuses the request
//! and leaves all state untouched. Nothing here is fatal.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The targeted cell is in the wrong state for the requested
    /// action, or the action has no valid target at all
    #[error("invalid target for the requested action")]
    InvalidTarget,

    /// Skill cost exceeds the invoker's current score
    #[error("score too low for this skill")]
    InsufficientScore,

    /// A prior action or animation has not finished resolving
    #[error("a previous action is still resolving")]
    ActionWhileBusy,

    /// The game has reached a terminal status
    #[error("the game is already over")]
    ActionAfterTerminal,

    /// Command issued by the side whose turn it is not
    #[error("not this side's turn")]
    NotYourTurn,
}
