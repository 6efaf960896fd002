//! Computer opponent decision making
//!
//! The computer decides each turn whether to spend a skill before it
//! places a piece. The decision is probabilistic: the chance grows
//! linearly with the computer's accumulated score and is capped, so a
//! rich opponent uses skills often but never always. Move selection
//! itself lives in [`crate::eval`].

use rand::Rng;

use crate::skills::{Skill, SkillId, CATALOG};

/// Upper bound on the per-turn skill probability
const SKILL_CHANCE_CAP: f64 = 0.8;

/// Probability that the computer spends a skill this turn:
/// `min(0.8, score / 20 * 0.6)`
pub fn skill_chance(score: i32) -> f64 {
    (f64::from(score.max(0)) / 20.0 * 0.6).min(SKILL_CHANCE_CAP)
}

/// Skills the computer could invoke right now, most expensive first.
///
/// The instant-win skill is never considered, nor are disabled catalog
/// entries. The sort is stable, so equally priced skills keep catalog
/// order — the documented tie-break.
pub fn affordable_skills(score: i32) -> Vec<&'static Skill> {
    let mut candidates: Vec<&'static Skill> = CATALOG
        .iter()
        .filter(|s| s.cost <= score && s.id != SkillId::InstantWin && !s.disabled)
        .collect();
    candidates.sort_by(|a, b| b.cost.cmp(&a.cost));
    candidates
}

/// Roll the skill decision for this turn.
///
/// Returns the single most expensive affordable skill when the roll
/// fires, `None` otherwise. The RNG is consumed only when at least one
/// candidate exists, keeping seeded runs reproducible.
pub fn decide_skill<R: Rng>(score: i32, rng: &mut R) -> Option<SkillId> {
    let candidates = affordable_skills(score);
    let best = candidates.first()?;
    if rng.gen::<f64>() < skill_chance(score) {
        Some(best.id)
    } else {
        None
    }
}
