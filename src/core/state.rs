use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::damage::DamageCategory;
use crate::core::error::{BattleError, Result};
use crate::core::events::BattleEvent;
use crate::core::statuses::{MajorStatus, StatusKind};
use crate::data::type_chart::ElementType;

pub const MAX_MOVES: usize = 4;
pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("player"),
            Side::Opponent => f.write_str("opponent"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
}

impl StatKind {
    pub fn label(self) -> &'static str {
        match self {
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::SpecialAttack => "Sp. Atk",
            StatKind::SpecialDefense => "Sp. Def",
            StatKind::Speed => "Speed",
            StatKind::Accuracy => "accuracy",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages {
    pub attack: i8,
    pub defense: i8,
    pub special_attack: i8,
    pub special_defense: i8,
    pub speed: i8,
    pub accuracy: i8,
}

impl StatStages {
    pub fn get(&self, stat: StatKind) -> i8 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.special_attack,
            StatKind::SpecialDefense => self.special_defense,
            StatKind::Speed => self.speed,
            StatKind::Accuracy => self.accuracy,
        }
    }

    pub fn set(&mut self, stat: StatKind, stage: i8) {
        let stage = stage.clamp(MIN_STAGE, MAX_STAGE);
        match stat {
            StatKind::Attack => self.attack = stage,
            StatKind::Defense => self.defense = stage,
            StatKind::SpecialAttack => self.special_attack = stage,
            StatKind::SpecialDefense => self.special_defense = stage,
            StatKind::Speed => self.speed = stage,
            StatKind::Accuracy => self.accuracy = stage,
        }
    }

    /// Stage that `delta` would produce, clamped to [-6, +6].
    pub fn shifted(&self, stat: StatKind, delta: i8) -> i8 {
        (self.get(stat) as i16 + delta as i16).clamp(MIN_STAGE as i16, MAX_STAGE as i16) as i8
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.special_attack,
            StatKind::SpecialDefense => self.special_defense,
            StatKind::Speed => self.speed,
            StatKind::Accuracy => 100,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn damage_category(self) -> Option<DamageCategory> {
        match self {
            MoveCategory::Physical => Some(DamageCategory::Physical),
            MoveCategory::Special => Some(DamageCategory::Special),
            MoveCategory::Status => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    User,
    Opponent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: StatKind,
    pub stages: i8,
}

/// Closed set of secondary effects a move can carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectKind {
    InflictStatus { status: StatusKind },
    StatChange { target: EffectTarget, changes: Vec<StatChange> },
    /// Restores a percentage of the user's max HP.
    Heal { percent: u8 },
    /// Restores a percentage of the damage just dealt.
    Drain { percent: u8 },
    /// User takes a percentage of the damage just dealt.
    Recoil { percent: u8 },
    /// Clears the user's major status.
    Cure,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEffect {
    /// Percent chance to trigger; `None` means it always triggers.
    pub chance: Option<u8>,
    #[serde(flatten)]
    pub kind: EffectKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub id: u32,
    pub name: String,
    pub element: ElementType,
    pub power: Option<u16>,
    /// `None` never misses.
    pub accuracy: Option<u8>,
    /// `None` is unlimited.
    pub pp: Option<u8>,
    pub priority: i8,
    pub category: MoveCategory,
    pub effect: Option<MoveEffect>,
}

impl Move {
    /// Power and damage class, if this move deals formula damage.
    pub fn damaging(&self) -> Option<(u16, DamageCategory)> {
        let category = self.category.damage_category()?;
        match self.power {
            Some(power) if power > 0 => Some((power, category)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// One or two types, primary first.
    pub types: Vec<ElementType>,
    pub base_stats: BaseStats,
    pub ability: Option<String>,
    pub moves: Vec<Move>,
    /// Move names the catalog lists as learnable; empty means unrestricted.
    #[serde(default)]
    pub learnable: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub pokemon: Pokemon,
    pub hp: u32,
    pub stages: StatStages,
    pub status: Option<MajorStatus>,
    /// Remaining PP per move slot; `None` is unlimited.
    pub pp: Vec<Option<u8>>,
}

impl Combatant {
    pub fn new(pokemon: Pokemon) -> Self {
        let pp = pokemon.moves.iter().map(|m| m.pp).collect();
        Self {
            hp: pokemon.base_stats.hp,
            stages: StatStages::default(),
            status: None,
            pp,
            pokemon,
        }
    }

    pub fn max_hp(&self) -> u32 {
        self.pokemon.base_stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn name(&self) -> &str {
        &self.pokemon.name
    }

    pub fn has_type(&self, element: ElementType) -> bool {
        self.pokemon.types.contains(&element)
    }

    pub fn move_slot(&self, move_id: u32) -> Option<usize> {
        self.pokemon.moves.iter().position(|m| m.id == move_id)
    }

    pub fn has_pp(&self, slot: usize) -> bool {
        self.pp.get(slot).map_or(false, |pp| pp.map_or(true, |left| left > 0))
    }

    pub fn usable_moves(&self) -> impl Iterator<Item = &Move> {
        self.pokemon
            .moves
            .iter()
            .enumerate()
            .filter(|(slot, _)| self.has_pp(*slot))
            .map(|(_, m)| m)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideState {
    pub combatant: Combatant,
    pub last_move: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "side", rename_all = "snake_case")]
pub enum Outcome {
    Winner(Side),
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    UseMove { move_id: u32 },
    Pass,
}

impl Action {
    pub fn use_move(move_id: u32) -> Self {
        Action::UseMove { move_id }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleHistory {
    pub turns: Vec<BattleTurn>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleTurn {
    pub turn: u32,
    pub actions: [Action; 2],
    pub rng: Vec<f64>,
    pub events: Vec<BattleEvent>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub sides: [SideState; 2],
    pub turn: u32,
    pub outcome: Option<Outcome>,
    pub history: Option<BattleHistory>,
}

impl BattleState {
    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side.index()]
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.sides[side.index()].combatant
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        &mut self.sides[side.index()].combatant
    }

    pub fn hp(&self) -> [u32; 2] {
        [
            self.combatant(Side::Player).hp,
            self.combatant(Side::Opponent).hp,
        ]
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

pub fn create_battle_state(player: Pokemon, opponent: Pokemon) -> Result<BattleState> {
    validate_pokemon(Side::Player, &player)?;
    validate_pokemon(Side::Opponent, &opponent)?;
    Ok(BattleState {
        sides: [
            SideState {
                combatant: Combatant::new(player),
                last_move: None,
            },
            SideState {
                combatant: Combatant::new(opponent),
                last_move: None,
            },
        ],
        turn: 0,
        outcome: None,
        history: None,
    })
}

/// Checks the combat fields of both sides, which callers may have edited.
pub fn validate_state(state: &BattleState) -> Result<()> {
    for side in Side::BOTH {
        validate_combatant(side, state.combatant(side))?;
    }
    Ok(())
}

fn validate_combatant(side: Side, combatant: &Combatant) -> Result<()> {
    validate_pokemon(side, &combatant.pokemon)?;
    let invalid = |reason: String| BattleError::InvalidCombatant { side, reason };
    if combatant.hp > combatant.max_hp() {
        return Err(invalid(format!(
            "{} has {} HP, max {}",
            combatant.name(),
            combatant.hp,
            combatant.max_hp()
        )));
    }
    if combatant.pp.len() != combatant.pokemon.moves.len() {
        return Err(invalid(format!(
            "{} tracks PP for {} slots but knows {} moves",
            combatant.name(),
            combatant.pp.len(),
            combatant.pokemon.moves.len()
        )));
    }
    let stages = combatant.stages;
    let out_of_range = [
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpecialAttack,
        StatKind::SpecialDefense,
        StatKind::Speed,
        StatKind::Accuracy,
    ]
    .into_iter()
    .find(|stat| !(MIN_STAGE..=MAX_STAGE).contains(&stages.get(*stat)));
    if let Some(stat) = out_of_range {
        return Err(invalid(format!(
            "{} has {} stage {}",
            combatant.name(),
            stat.label(),
            stages.get(stat)
        )));
    }
    Ok(())
}

fn validate_pokemon(side: Side, pokemon: &Pokemon) -> Result<()> {
    let invalid = |reason: String| BattleError::InvalidCombatant { side, reason };
    if pokemon.types.is_empty() || pokemon.types.len() > 2 {
        return Err(invalid(format!(
            "{} has {} types",
            pokemon.name,
            pokemon.types.len()
        )));
    }
    if pokemon.base_stats.hp == 0 {
        return Err(invalid(format!("{} has zero base HP", pokemon.name)));
    }
    if pokemon.moves.is_empty() || pokemon.moves.len() > MAX_MOVES {
        return Err(invalid(format!(
            "{} has {} moves, expected 1 to {}",
            pokemon.name,
            pokemon.moves.len(),
            MAX_MOVES
        )));
    }
    for (i, m) in pokemon.moves.iter().enumerate() {
        if pokemon.moves[..i].iter().any(|other| other.id == m.id) {
            return Err(invalid(format!("{} lists {} twice", pokemon.name, m.name)));
        }
    }
    Ok(())
}
