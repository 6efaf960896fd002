//! Skill catalog and the multi-step skill state machine
//!
//! Skills are fixed data keyed by [`SkillId`]; nothing in the catalog
//! is created or destroyed at runtime. Targeted skills run through
//! [`SkillState`], a sum type whose variants make illegal phase and
//! payload combinations unrepresentable: only the second relocation
//! phase can carry a source position, and the cooperative capture
//! carries nothing but its phase.

use serde::{Deserialize, Serialize};

use crate::board::Pos;

/// Identifier for each skill in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillId {
    /// Remove one opponent piece; invoker still places this turn
    RemovePiece,
    /// Skip the opponent's next turn
    SkipTurn,
    /// Flip ownership of every piece on the board
    SwapSides,
    /// Move one opponent piece to an empty cell
    RelocatePiece,
    /// Place own, opponent's, then own piece in sequence
    CooperativeCapture,
    /// Remove 1-3 random opponent pieces
    RandomClear,
    /// Win outright, bypassing the board
    InstantWin,
}

/// Static skill descriptor
#[derive(Debug, Clone, Copy)]
pub struct Skill {
    pub id: SkillId,
    pub name: &'static str,
    pub cost: i32,
    pub description: &'static str,
    /// Disabled skills stay listed but can never be invoked
    pub disabled: bool,
}

/// The fixed skill catalog. Order matters: it is the deterministic
/// tie-break when the computer picks among equally priced skills.
pub const CATALOG: [Skill; 7] = [
    Skill {
        id: SkillId::RemovePiece,
        name: "Flying Sand",
        cost: 3,
        description: "Remove one of your opponent's pieces from the board.",
        disabled: false,
    },
    Skill {
        id: SkillId::SkipTurn,
        name: "Still Water",
        cost: 4,
        description: "Freeze your opponent and skip their next turn.",
        disabled: false,
    },
    Skill {
        id: SkillId::SwapSides,
        name: "Polarity Reversal",
        cost: 8,
        description: "Swap ownership of every piece on the board.",
        disabled: false,
    },
    Skill {
        id: SkillId::RelocatePiece,
        name: "Luring the Tiger",
        cost: 5,
        description: "Move one opponent piece to any empty cell.",
        disabled: false,
    },
    Skill {
        id: SkillId::CooperativeCapture,
        name: "Seize and Control",
        cost: 7,
        description: "Place a piece for yourself, one for your opponent, then one more for yourself.",
        disabled: false,
    },
    Skill {
        id: SkillId::RandomClear,
        name: "Clean Sweep",
        cost: 6,
        description: "Randomly clear 1-3 opponent pieces off the board.",
        disabled: false,
    },
    Skill {
        id: SkillId::InstantWin,
        name: "Mountain Mover",
        cost: 12,
        description: "Ignore the rules and claim immediate victory.",
        disabled: false,
    },
];

/// Look up a skill descriptor by id
pub fn skill(id: SkillId) -> &'static Skill {
    let idx = match id {
        SkillId::RemovePiece => 0,
        SkillId::SkipTurn => 1,
        SkillId::SwapSides => 2,
        SkillId::RelocatePiece => 3,
        SkillId::CooperativeCapture => 4,
        SkillId::RandomClear => 5,
        SkillId::InstantWin => 6,
    };
    &CATALOG[idx]
}

/// Phase of the two-step relocation skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelocatePhase {
    /// Waiting for an opponent piece to be selected
    SelectPiece,
    /// Piece chosen; waiting for an empty destination
    PlacePiece { source: Pos },
}

/// Phase of the three-step cooperative capture skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapturePhase {
    PlaceOwnFirst,
    PlaceOpponent,
    PlaceOwnSecond,
}

/// In-progress targeted skill invocation, scoped to the side that
/// activated it. At most one may be active at a time; it is reset to
/// `Idle` on completion, cancellation, or restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SkillState {
    #[default]
    Idle,
    /// Single targeting step: pick the opponent piece to remove
    RemovePiece,
    Relocate(RelocatePhase),
    Capture(CapturePhase),
}

impl SkillState {
    #[inline]
    pub fn is_idle(self) -> bool {
        self == SkillState::Idle
    }

    /// The skill this state belongs to, if any
    pub fn skill_id(self) -> Option<SkillId> {
        match self {
            SkillState::Idle => None,
            SkillState::RemovePiece => Some(SkillId::RemovePiece),
            SkillState::Relocate(_) => Some(SkillId::RelocatePiece),
            SkillState::Capture(_) => Some(SkillId::CooperativeCapture),
        }
    }
}
