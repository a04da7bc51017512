use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::CatalogError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

pub const TYPE_COUNT: usize = 18;

impl ElementType {
    pub const ALL: [ElementType; TYPE_COUNT] = [
        ElementType::Normal,
        ElementType::Fire,
        ElementType::Water,
        ElementType::Electric,
        ElementType::Grass,
        ElementType::Ice,
        ElementType::Fighting,
        ElementType::Poison,
        ElementType::Ground,
        ElementType::Flying,
        ElementType::Psychic,
        ElementType::Bug,
        ElementType::Rock,
        ElementType::Ghost,
        ElementType::Dragon,
        ElementType::Dark,
        ElementType::Steel,
        ElementType::Fairy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Normal => "normal",
            ElementType::Fire => "fire",
            ElementType::Water => "water",
            ElementType::Electric => "electric",
            ElementType::Grass => "grass",
            ElementType::Ice => "ice",
            ElementType::Fighting => "fighting",
            ElementType::Poison => "poison",
            ElementType::Ground => "ground",
            ElementType::Flying => "flying",
            ElementType::Psychic => "psychic",
            ElementType::Bug => "bug",
            ElementType::Rock => "rock",
            ElementType::Ghost => "ghost",
            ElementType::Dragon => "dragon",
            ElementType::Dark => "dark",
            ElementType::Steel => "steel",
            ElementType::Fairy => "fairy",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| CatalogError::UnknownType(s.to_string()))
    }
}

/// Combined type-matchup multiplier against one or two defending types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    Immune,
    Quarter,
    Half,
    Neutral,
    Double,
    Quadruple,
}

impl Effectiveness {
    /// Multiplier on the quarter scale: 0, 1, 2, 4, 8, 16 (4 = ×1).
    pub fn quarters(self) -> u32 {
        match self {
            Effectiveness::Immune => 0,
            Effectiveness::Quarter => 1,
            Effectiveness::Half => 2,
            Effectiveness::Neutral => 4,
            Effectiveness::Double => 8,
            Effectiveness::Quadruple => 16,
        }
    }

    pub fn multiplier(self) -> f64 {
        self.quarters() as f64 / 4.0
    }

    pub fn is_immune(self) -> bool {
        self == Effectiveness::Immune
    }

    fn from_quarters(q: u32) -> Self {
        match q {
            0 => Effectiveness::Immune,
            1 => Effectiveness::Quarter,
            2 => Effectiveness::Half,
            8 => Effectiveness::Double,
            16 => Effectiveness::Quadruple,
            _ => Effectiveness::Neutral,
        }
    }
}

// Single-type cells on the half scale: 0 = immune, 1 = ×0.5, 2 = ×1, 4 = ×2.
const IMMUNE: u8 = 0;
const RESISTED: u8 = 1;
const NEUTRAL: u8 = 2;
const SUPER: u8 = 4;

use ElementType::*;

const MATCHUPS: &[(ElementType, ElementType, u8)] = &[
    (Normal, Rock, RESISTED),
    (Normal, Steel, RESISTED),
    (Normal, Ghost, IMMUNE),
    (Fire, Grass, SUPER),
    (Fire, Ice, SUPER),
    (Fire, Bug, SUPER),
    (Fire, Steel, SUPER),
    (Fire, Fire, RESISTED),
    (Fire, Water, RESISTED),
    (Fire, Rock, RESISTED),
    (Fire, Dragon, RESISTED),
    (Water, Fire, SUPER),
    (Water, Ground, SUPER),
    (Water, Rock, SUPER),
    (Water, Water, RESISTED),
    (Water, Grass, RESISTED),
    (Water, Dragon, RESISTED),
    (Electric, Water, SUPER),
    (Electric, Flying, SUPER),
    (Electric, Electric, RESISTED),
    (Electric, Grass, RESISTED),
    (Electric, Dragon, RESISTED),
    (Electric, Ground, IMMUNE),
    (Grass, Water, SUPER),
    (Grass, Ground, SUPER),
    (Grass, Rock, SUPER),
    (Grass, Fire, RESISTED),
    (Grass, Grass, RESISTED),
    (Grass, Poison, RESISTED),
    (Grass, Flying, RESISTED),
    (Grass, Bug, RESISTED),
    (Grass, Dragon, RESISTED),
    (Grass, Steel, RESISTED),
    (Ice, Grass, SUPER),
    (Ice, Ground, SUPER),
    (Ice, Flying, SUPER),
    (Ice, Dragon, SUPER),
    (Ice, Fire, RESISTED),
    (Ice, Water, RESISTED),
    (Ice, Ice, RESISTED),
    (Ice, Steel, RESISTED),
    (Fighting, Normal, SUPER),
    (Fighting, Ice, SUPER),
    (Fighting, Rock, SUPER),
    (Fighting, Dark, SUPER),
    (Fighting, Steel, SUPER),
    (Fighting, Poison, RESISTED),
    (Fighting, Flying, RESISTED),
    (Fighting, Psychic, RESISTED),
    (Fighting, Bug, RESISTED),
    (Fighting, Fairy, RESISTED),
    (Fighting, Ghost, IMMUNE),
    (Poison, Grass, SUPER),
    (Poison, Fairy, SUPER),
    (Poison, Poison, RESISTED),
    (Poison, Ground, RESISTED),
    (Poison, Rock, RESISTED),
    (Poison, Ghost, RESISTED),
    (Poison, Steel, IMMUNE),
    (Ground, Fire, SUPER),
    (Ground, Electric, SUPER),
    (Ground, Poison, SUPER),
    (Ground, Rock, SUPER),
    (Ground, Steel, SUPER),
    (Ground, Grass, RESISTED),
    (Ground, Bug, RESISTED),
    (Ground, Flying, IMMUNE),
    (Flying, Grass, SUPER),
    (Flying, Fighting, SUPER),
    (Flying, Bug, SUPER),
    (Flying, Electric, RESISTED),
    (Flying, Rock, RESISTED),
    (Flying, Steel, RESISTED),
    (Psychic, Fighting, SUPER),
    (Psychic, Poison, SUPER),
    (Psychic, Psychic, RESISTED),
    (Psychic, Steel, RESISTED),
    (Psychic, Dark, IMMUNE),
    (Bug, Grass, SUPER),
    (Bug, Psychic, SUPER),
    (Bug, Dark, SUPER),
    (Bug, Fire, RESISTED),
    (Bug, Fighting, RESISTED),
    (Bug, Poison, RESISTED),
    (Bug, Flying, RESISTED),
    (Bug, Ghost, RESISTED),
    (Bug, Steel, RESISTED),
    (Bug, Fairy, RESISTED),
    (Rock, Fire, SUPER),
    (Rock, Ice, SUPER),
    (Rock, Flying, SUPER),
    (Rock, Bug, SUPER),
    (Rock, Fighting, RESISTED),
    (Rock, Ground, RESISTED),
    (Rock, Steel, RESISTED),
    (Ghost, Psychic, SUPER),
    (Ghost, Ghost, SUPER),
    (Ghost, Dark, RESISTED),
    (Ghost, Normal, IMMUNE),
    (Dragon, Dragon, SUPER),
    (Dragon, Steel, RESISTED),
    (Dragon, Fairy, IMMUNE),
    (Dark, Psychic, SUPER),
    (Dark, Ghost, SUPER),
    (Dark, Fighting, RESISTED),
    (Dark, Dark, RESISTED),
    (Dark, Fairy, RESISTED),
    (Steel, Ice, SUPER),
    (Steel, Rock, SUPER),
    (Steel, Fairy, SUPER),
    (Steel, Fire, RESISTED),
    (Steel, Water, RESISTED),
    (Steel, Electric, RESISTED),
    (Steel, Steel, RESISTED),
    (Fairy, Fighting, SUPER),
    (Fairy, Dragon, SUPER),
    (Fairy, Dark, SUPER),
    (Fairy, Fire, RESISTED),
    (Fairy, Poison, RESISTED),
    (Fairy, Steel, RESISTED),
];

const fn build_chart() -> [[u8; TYPE_COUNT]; TYPE_COUNT] {
    let mut chart = [[NEUTRAL; TYPE_COUNT]; TYPE_COUNT];
    let mut i = 0;
    while i < MATCHUPS.len() {
        let (attacking, defending, cell) = MATCHUPS[i];
        chart[attacking as usize][defending as usize] = cell;
        i += 1;
    }
    chart
}

/// Attacking type (row) against a single defending type (column).
pub static TYPE_CHART: [[u8; TYPE_COUNT]; TYPE_COUNT] = build_chart();

/// Single-type multiplier: 0, 0.5, 1 or 2.
pub fn single_multiplier(attacking: ElementType, defending: ElementType) -> f64 {
    TYPE_CHART[attacking as usize][defending as usize] as f64 / 2.0
}

/// Folds one or two defending types into a combined multiplier.
///
/// A zero from either defending type makes the whole result `Immune`.
/// Duplicate defending types count once.
pub fn effectiveness(attacking: ElementType, defending: &[ElementType]) -> Effectiveness {
    let mut quarters: u32 = 4;
    let mut seen: Option<ElementType> = None;
    for &defender in defending.iter().take(2) {
        if seen == Some(defender) {
            continue;
        }
        seen = Some(defender);
        let cell = TYPE_CHART[attacking as usize][defender as usize] as u32;
        if cell == 0 {
            return Effectiveness::Immune;
        }
        quarters = quarters * cell / 2;
    }
    Effectiveness::from_quarters(quarters)
}
