//! Damage formula.
//!
//! All arithmetic is integer and floors at every step:
//!
//! ```text
//! base   = (LEVEL_FACTOR * power * attack / defense) / 50 + 2
//! crit   = base * 3 / 2                      (critical hits only)
//! varied = crit * roll / 100                 (roll in 85..=100)
//! final  = varied * quarters / 4             (effectiveness, quarter scale)
//! ```
//!
//! The result is 0 for immune hits and at least 1 for everything else.

use serde::{Deserialize, Serialize};

use crate::core::rng::RandomSource;
use crate::data::type_chart::Effectiveness;

/// Every combatant fights at this level.
pub const LEVEL: u32 = 50;
pub const LEVEL_FACTOR: u32 = 2 * LEVEL / 5 + 2;

/// 1 in 16 per non-immune damaging hit.
pub const CRIT_CHANCE: (u32, u32) = (1, 16);
/// Critical hits multiply damage by 3/2.
pub const CRIT_MULTIPLIER: (u32, u32) = (3, 2);

pub const MIN_DAMAGE_ROLL: u32 = 85;
pub const MAX_DAMAGE_ROLL: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageCategory {
    Physical,
    Special,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageInput {
    /// Staged Attack or Sp. Atk of the user.
    pub attack: u32,
    /// Staged Defense or Sp. Def of the target, at least 1.
    pub defense: u32,
    pub power: u16,
    pub effectiveness: Effectiveness,
    pub critical: bool,
    pub category: DamageCategory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRoll {
    pub amount: u32,
    pub critical: bool,
    pub roll: u32,
}

/// Damage before the random roll, crit included.
pub fn base_damage(input: &DamageInput) -> u32 {
    let defense = input.defense.max(1) as u64;
    let raw = LEVEL_FACTOR as u64 * input.power as u64 * input.attack as u64 / defense;
    let mut damage = raw / 50 + 2;
    if input.critical {
        damage = damage * CRIT_MULTIPLIER.0 as u64 / CRIT_MULTIPLIER.1 as u64;
    }
    damage.min(u32::MAX as u64) as u32
}

/// Deterministic formula for a fixed variance roll in 85..=100.
pub fn compute_damage_with_roll(input: &DamageInput, roll: u32) -> u32 {
    if input.effectiveness.is_immune() {
        return 0;
    }
    let roll = roll.clamp(MIN_DAMAGE_ROLL, MAX_DAMAGE_ROLL) as u64;
    let varied = base_damage(input) as u64 * roll / 100;
    let damage = varied * input.effectiveness.quarters() as u64 / 4;
    (damage.min(u32::MAX as u64) as u32).max(1)
}

/// Draws the variance roll from `rng` and applies the formula.
pub fn compute_damage(input: &DamageInput, rng: &mut dyn RandomSource) -> u32 {
    let roll = rng.range_inclusive(MIN_DAMAGE_ROLL, MAX_DAMAGE_ROLL);
    compute_damage_with_roll(input, roll)
}

pub fn roll_critical(rng: &mut dyn RandomSource) -> bool {
    rng.chance(CRIT_CHANCE.0, CRIT_CHANCE.1)
}

/// Full hit: crit draw, then variance draw. Immune hits draw nothing.
pub fn roll_damage(
    attack: u32,
    defense: u32,
    power: u16,
    effectiveness: Effectiveness,
    category: DamageCategory,
    rng: &mut dyn RandomSource,
) -> DamageRoll {
    if effectiveness.is_immune() {
        return DamageRoll {
            amount: 0,
            critical: false,
            roll: 0,
        };
    }
    let critical = roll_critical(rng);
    let roll = rng.range_inclusive(MIN_DAMAGE_ROLL, MAX_DAMAGE_ROLL);
    let input = DamageInput {
        attack,
        defense,
        power,
        effectiveness,
        critical,
        category,
    };
    DamageRoll {
        amount: compute_damage_with_roll(&input, roll),
        critical,
        roll,
    }
}
