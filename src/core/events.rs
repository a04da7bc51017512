use serde::{Deserialize, Serialize};

use crate::core::state::{BattleState, Side, StatKind};
use crate::core::statuses::{cure, MajorStatus, StatusKind};
use crate::data::type_chart::Effectiveness;

/// One entry of the ordered turn log. The order of a `Vec<BattleEvent>` is
/// the canonical playback order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleEvent {
    TurnStart {
        turn: u32,
        /// HP of both sides when the turn begins, player first.
        hp: [u32; 2],
    },
    MoveUsed {
        side: Side,
        move_id: u32,
        move_name: String,
    },
    MoveMissed {
        side: Side,
    },
    CantMove {
        side: Side,
        status: StatusKind,
    },
    DamageDealt {
        side: Side,
        target: Side,
        amount: u32,
        hp_after: u32,
        critical: bool,
        effectiveness: Effectiveness,
    },
    RecoilDamage {
        side: Side,
        amount: u32,
        hp_after: u32,
    },
    HpRestored {
        side: Side,
        amount: u32,
        hp_after: u32,
    },
    StatusApplied {
        side: Side,
        status: MajorStatus,
    },
    StatusDamage {
        side: Side,
        status: StatusKind,
        amount: u32,
        hp_after: u32,
    },
    StatusHealed {
        side: Side,
        status: StatusKind,
    },
    StatChanged {
        side: Side,
        stat: StatKind,
        delta: i8,
        stage: i8,
    },
    Faint {
        side: Side,
    },
}

pub fn event_type(event: &BattleEvent) -> &'static str {
    match event {
        BattleEvent::TurnStart { .. } => "turn_start",
        BattleEvent::MoveUsed { .. } => "move_used",
        BattleEvent::MoveMissed { .. } => "move_missed",
        BattleEvent::CantMove { .. } => "cant_move",
        BattleEvent::DamageDealt { .. } => "damage_dealt",
        BattleEvent::RecoilDamage { .. } => "recoil_damage",
        BattleEvent::HpRestored { .. } => "hp_restored",
        BattleEvent::StatusApplied { .. } => "status_applied",
        BattleEvent::StatusDamage { .. } => "status_damage",
        BattleEvent::StatusHealed { .. } => "status_healed",
        BattleEvent::StatChanged { .. } => "stat_changed",
        BattleEvent::Faint { .. } => "faint",
    }
}

/// Writes the effect of one event into `state`.
pub fn apply_event(state: &mut BattleState, event: &BattleEvent) {
    match event {
        BattleEvent::TurnStart { turn, .. } => {
            state.turn = *turn;
        }
        BattleEvent::MoveUsed { side, move_id, .. } => {
            let side_state = state.side_mut(*side);
            side_state.last_move = Some(*move_id);
            let combatant = &mut side_state.combatant;
            if let Some(slot) = combatant.move_slot(*move_id) {
                if let Some(Some(pp)) = combatant.pp.get_mut(slot) {
                    *pp = pp.saturating_sub(1);
                }
            }
        }
        BattleEvent::DamageDealt {
            target, hp_after, ..
        } => {
            state.combatant_mut(*target).hp = *hp_after;
        }
        BattleEvent::RecoilDamage { side, hp_after, .. }
        | BattleEvent::HpRestored { side, hp_after, .. }
        | BattleEvent::StatusDamage { side, hp_after, .. } => {
            state.combatant_mut(*side).hp = *hp_after;
        }
        BattleEvent::StatusApplied { side, status } => {
            state.combatant_mut(*side).status = Some(*status);
        }
        BattleEvent::StatusHealed { side, .. } => {
            cure(state.combatant_mut(*side));
        }
        BattleEvent::StatChanged { side, stat, stage, .. } => {
            state.combatant_mut(*side).stages.set(*stat, *stage);
        }
        BattleEvent::Faint { side } => {
            state.combatant_mut(*side).hp = 0;
        }
        BattleEvent::MoveMissed { .. } | BattleEvent::CantMove { .. } => {}
    }
}

/// Applies a whole log in order.
pub fn apply_events(state: &mut BattleState, events: &[BattleEvent]) {
    for event in events {
        apply_event(state, event);
    }
}

/// One line of narration. `names` are the player's and opponent's combatants.
pub fn describe(event: &BattleEvent, names: [&str; 2]) -> String {
    let name = |side: &Side| names[side.index()];
    match event {
        BattleEvent::TurnStart { turn, .. } => format!("--- Turn {} ---", turn),
        BattleEvent::MoveUsed {
            side, move_name, ..
        } => format!("{} used {}!", name(side), move_name),
        BattleEvent::MoveMissed { side } => format!("{}'s attack missed!", name(side)),
        BattleEvent::CantMove { side, status } => match status {
            StatusKind::Sleep => format!("{} is fast asleep.", name(side)),
            StatusKind::Freeze => format!("{} is frozen solid!", name(side)),
            StatusKind::Paralysis => format!("{} is fully paralyzed!", name(side)),
            other => format!("{} can't move ({})!", name(side), other),
        },
        BattleEvent::DamageDealt {
            target,
            amount,
            critical,
            effectiveness,
            ..
        } => {
            let mut line = String::new();
            if *critical {
                line.push_str("A critical hit! ");
            }
            match effectiveness {
                Effectiveness::Immune => {
                    line.push_str(&format!("It doesn't affect {}...", name(target)));
                    return line;
                }
                Effectiveness::Double | Effectiveness::Quadruple => {
                    line.push_str("It's super effective! ")
                }
                Effectiveness::Half | Effectiveness::Quarter => {
                    line.push_str("It's not very effective... ")
                }
                Effectiveness::Neutral => {}
            }
            line.push_str(&format!("{} took {} damage.", name(target), amount));
            line
        }
        BattleEvent::RecoilDamage { side, amount, .. } => {
            format!("{} is damaged by recoil ({}).", name(side), amount)
        }
        BattleEvent::HpRestored { side, amount, .. } => {
            format!("{} restored {} HP.", name(side), amount)
        }
        BattleEvent::StatusApplied { side, status } => match status.kind() {
            StatusKind::Burn => format!("{} was burned!", name(side)),
            StatusKind::Poison => format!("{} was poisoned!", name(side)),
            StatusKind::Paralysis => format!("{} is paralyzed! It may be unable to move!", name(side)),
            StatusKind::Sleep => format!("{} fell asleep!", name(side)),
            StatusKind::Freeze => format!("{} was frozen solid!", name(side)),
        },
        BattleEvent::StatusDamage {
            side,
            status,
            amount,
            ..
        } => format!("{} is hurt by its {} ({}).", name(side), status, amount),
        BattleEvent::StatusHealed { side, status } => match status {
            StatusKind::Sleep => format!("{} woke up!", name(side)),
            StatusKind::Freeze => format!("{} thawed out!", name(side)),
            other => format!("{} was cured of its {}.", name(side), other),
        },
        BattleEvent::StatChanged {
            side, stat, delta, ..
        } => {
            let verb = match delta {
                d if *d >= 2 => "rose sharply",
                d if *d > 0 => "rose",
                d if *d <= -2 => "harshly fell",
                _ => "fell",
            };
            format!("{}'s {} {}!", name(side), stat.label(), verb)
        }
        BattleEvent::Faint { side } => format!("{} fainted!", name(side)),
    }
}
