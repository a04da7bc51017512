use crate::core::state::{Combatant, StatKind, MAX_STAGE, MIN_STAGE};
use crate::core::statuses;

/// Stage ladder as an exact fraction: (2+s)/2 above zero, 2/(2-s) below.
pub fn stage_ratio(stage: i8) -> (u32, u32) {
    let s = stage.clamp(MIN_STAGE, MAX_STAGE) as i32;
    if s >= 0 {
        ((2 + s) as u32, 2)
    } else {
        (2, (2 - s) as u32)
    }
}

pub fn stage_multiplier(stage: i8) -> f64 {
    let (num, den) = stage_ratio(stage);
    num as f64 / den as f64
}

/// Accuracy uses the thirds ladder: (3+s)/3 above zero, 3/(3-s) below.
pub fn accuracy_ratio(stage: i8) -> (u32, u32) {
    let s = stage.clamp(MIN_STAGE, MAX_STAGE) as i32;
    if s >= 0 {
        ((3 + s) as u32, 3)
    } else {
        (3, (3 - s) as u32)
    }
}

/// Base stat after stage modification, floored.
pub fn effective_stat(base: u32, stage: i8) -> u32 {
    let (num, den) = stage_ratio(stage);
    (base as u64 * num as u64 / den as u64) as u32
}

/// Like [`effective_stat`] but never below 1, for stats used as divisors.
pub fn effective_divisor_stat(base: u32, stage: i8) -> u32 {
    effective_stat(base, stage).max(1)
}

/// Staged stat for a combatant. Defensive stats are floored at 1.
pub fn combatant_stat(combatant: &Combatant, stat: StatKind) -> u32 {
    let base = combatant.pokemon.base_stats.get(stat);
    let stage = combatant.stages.get(stat);
    match stat {
        StatKind::Defense | StatKind::SpecialDefense => effective_divisor_stat(base, stage),
        _ => effective_stat(base, stage),
    }
}

/// Speed used for turn ordering, including the paralysis penalty.
pub fn ordering_speed(combatant: &Combatant) -> u32 {
    let speed = combatant_stat(combatant, StatKind::Speed);
    statuses::modify_speed(combatant.status.as_ref(), speed)
}

/// Hit chance in percent for a move with the given accuracy, or `None` if it
/// cannot miss.
pub fn hit_chance(accuracy: Option<u8>, accuracy_stage: i8) -> Option<u32> {
    let accuracy = accuracy? as u32;
    let (num, den) = accuracy_ratio(accuracy_stage);
    Some(accuracy * num / den)
}
