use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::events::BattleEvent;
use crate::core::rng::RandomSource;
use crate::core::state::{Combatant, Side};
use crate::data::type_chart::ElementType;

/// Burn costs 1/16 of max HP at end of turn.
pub const BURN_TICK_DIVISOR: u32 = 16;
/// Poison costs 1/8 of max HP at end of turn.
pub const POISON_TICK_DIVISOR: u32 = 8;
pub const PARALYSIS_SKIP_CHANCE: (u32, u32) = (1, 4);
pub const PARALYSIS_SPEED_DIVISOR: u32 = 2;
pub const FREEZE_THAW_CHANCE: (u32, u32) = (1, 5);
/// Number of actions a fresh sleep skips, drawn uniformly.
pub const SLEEP_TURNS: (u32, u32) = (1, 3);

/// The single persistent condition a combatant may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MajorStatus {
    Burn,
    Poison,
    Paralysis,
    Sleep { turns_remaining: u8 },
    Freeze,
}

impl MajorStatus {
    pub fn kind(&self) -> StatusKind {
        match self {
            MajorStatus::Burn => StatusKind::Burn,
            MajorStatus::Poison => StatusKind::Poison,
            MajorStatus::Paralysis => StatusKind::Paralysis,
            MajorStatus::Sleep { .. } => StatusKind::Sleep,
            MajorStatus::Freeze => StatusKind::Freeze,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Burn,
    Poison,
    Paralysis,
    Sleep,
    Freeze,
}

impl StatusKind {
    /// Types that can never receive this condition.
    pub fn immune_types(self) -> &'static [ElementType] {
        match self {
            StatusKind::Burn => &[ElementType::Fire],
            StatusKind::Poison => &[ElementType::Poison, ElementType::Steel],
            StatusKind::Paralysis => &[ElementType::Electric],
            StatusKind::Freeze => &[ElementType::Ice],
            StatusKind::Sleep => &[],
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusKind::Burn => "burn",
            StatusKind::Poison => "poison",
            StatusKind::Paralysis => "paralysis",
            StatusKind::Sleep => "sleep",
            StatusKind::Freeze => "freeze",
        };
        f.write_str(name)
    }
}

/// Why an infliction did not land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InflictBlock {
    Fainted,
    AlreadyAffected(StatusKind),
    TypeImmune(ElementType),
}

pub fn can_inflict(target: &Combatant, kind: StatusKind) -> Result<(), InflictBlock> {
    if target.is_fainted() {
        return Err(InflictBlock::Fainted);
    }
    if let Some(current) = &target.status {
        return Err(InflictBlock::AlreadyAffected(current.kind()));
    }
    if let Some(&immune) = kind
        .immune_types()
        .iter()
        .find(|&&t| target.has_type(t))
    {
        return Err(InflictBlock::TypeImmune(immune));
    }
    Ok(())
}

/// Builds the status to apply. Sleep draws its duration from `rng`.
pub fn inflict(
    target: &Combatant,
    kind: StatusKind,
    rng: &mut dyn RandomSource,
) -> Result<MajorStatus, InflictBlock> {
    can_inflict(target, kind)?;
    Ok(match kind {
        StatusKind::Burn => MajorStatus::Burn,
        StatusKind::Poison => MajorStatus::Poison,
        StatusKind::Paralysis => MajorStatus::Paralysis,
        StatusKind::Freeze => MajorStatus::Freeze,
        StatusKind::Sleep => MajorStatus::Sleep {
            turns_remaining: rng.range_inclusive(SLEEP_TURNS.0, SLEEP_TURNS.1) as u8,
        },
    })
}

/// Removes any major status, returning what was cleared.
pub fn cure(combatant: &mut Combatant) -> Option<StatusKind> {
    combatant.status.take().map(|s| s.kind())
}

pub fn modify_speed(status: Option<&MajorStatus>, speed: u32) -> u32 {
    match status {
        Some(MajorStatus::Paralysis) => speed / PARALYSIS_SPEED_DIVISOR,
        _ => speed,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusHook {
    BeforeAction,
    TurnEnd,
}

#[derive(Debug, Default)]
pub struct StatusHookResult {
    pub events: Vec<BattleEvent>,
    pub prevent_action: bool,
    /// Silent replacement of the current status, applied before `events`.
    pub replace: Option<MajorStatus>,
}

pub struct StatusHookContext<'a> {
    pub rng: &'a mut dyn RandomSource,
    /// Sleep stopped this combatant's action during the current turn.
    pub slept_this_turn: bool,
}

pub fn run_status_hook(
    combatant: &Combatant,
    side: Side,
    hook: StatusHook,
    ctx: StatusHookContext<'_>,
) -> StatusHookResult {
    let Some(status) = combatant.status else {
        return StatusHookResult::default();
    };
    if combatant.is_fainted() {
        return StatusHookResult::default();
    }
    match hook {
        StatusHook::BeforeAction => before_action(status, side, ctx),
        StatusHook::TurnEnd => turn_end(combatant, status, side, ctx),
    }
}

fn before_action(status: MajorStatus, side: Side, mut ctx: StatusHookContext<'_>) -> StatusHookResult {
    let prevented = |kind: StatusKind| StatusHookResult {
        events: vec![BattleEvent::CantMove { side, status: kind }],
        prevent_action: true,
        replace: None,
    };
    match status {
        MajorStatus::Sleep { .. } => prevented(StatusKind::Sleep),
        MajorStatus::Freeze => {
            if ctx.rng.chance(FREEZE_THAW_CHANCE.0, FREEZE_THAW_CHANCE.1) {
                StatusHookResult {
                    events: vec![BattleEvent::StatusHealed {
                        side,
                        status: StatusKind::Freeze,
                    }],
                    ..Default::default()
                }
            } else {
                prevented(StatusKind::Freeze)
            }
        }
        MajorStatus::Paralysis => {
            if ctx.rng.chance(PARALYSIS_SKIP_CHANCE.0, PARALYSIS_SKIP_CHANCE.1) {
                prevented(StatusKind::Paralysis)
            } else {
                StatusHookResult::default()
            }
        }
        MajorStatus::Burn | MajorStatus::Poison => StatusHookResult::default(),
    }
}

fn turn_end(
    combatant: &Combatant,
    status: MajorStatus,
    side: Side,
    ctx: StatusHookContext<'_>,
) -> StatusHookResult {
    match status {
        MajorStatus::Burn => tick(combatant, side, StatusKind::Burn, BURN_TICK_DIVISOR),
        MajorStatus::Poison => tick(combatant, side, StatusKind::Poison, POISON_TICK_DIVISOR),
        MajorStatus::Sleep { turns_remaining } if ctx.slept_this_turn => {
            let left = turns_remaining.saturating_sub(1);
            if left == 0 {
                StatusHookResult {
                    events: vec![BattleEvent::StatusHealed {
                        side,
                        status: StatusKind::Sleep,
                    }],
                    ..Default::default()
                }
            } else {
                StatusHookResult {
                    replace: Some(MajorStatus::Sleep {
                        turns_remaining: left,
                    }),
                    ..Default::default()
                }
            }
        }
        _ => StatusHookResult::default(),
    }
}

fn tick(combatant: &Combatant, side: Side, status: StatusKind, divisor: u32) -> StatusHookResult {
    let damage = (combatant.max_hp() / divisor).max(1).min(combatant.hp);
    let hp_after = combatant.hp - damage;
    let mut events = vec![BattleEvent::StatusDamage {
        side,
        status,
        amount: damage,
        hp_after,
    }];
    if hp_after == 0 {
        events.push(BattleEvent::Faint { side });
    }
    StatusHookResult {
        events,
        ..Default::default()
    }
}
