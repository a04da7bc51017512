//! Running battle totals, folded from the event stream.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::core::events::BattleEvent;
use crate::core::state::Side;
use crate::data::type_chart::Effectiveness;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStats {
    /// Damage each side dealt with moves, indexed by side.
    pub damage_dealt: [u64; 2],
    /// All HP each side lost: move hits, recoil and status ticks.
    pub damage_received: [u64; 2],
    pub critical_hits: [u32; 2],
    pub effectiveness: BTreeMap<Effectiveness, u32>,
    /// HP of both sides sampled at every turn start.
    pub hp_history: Vec<[u32; 2]>,
    pub total_turns: u32,
    /// Wall-clock time, supplied by whoever played the battle back.
    pub duration: Option<Duration>,
}

/// Flat record for scoreboards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub turns: u32,
    pub player_damage: u64,
    pub opponent_damage: u64,
    pub player_crits: u32,
    pub opponent_crits: u32,
    pub duration_ms: Option<u64>,
}

impl BattleStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `events` into a fresh aggregate.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a BattleEvent>) -> Self {
        let mut stats = Self::new();
        stats.record_all(events);
        stats
    }

    pub fn record_all<'a>(&mut self, events: impl IntoIterator<Item = &'a BattleEvent>) {
        for event in events {
            self.record(event);
        }
    }

    pub fn record(&mut self, event: &BattleEvent) {
        match event {
            BattleEvent::TurnStart { hp, .. } => {
                self.total_turns += 1;
                self.hp_history.push(*hp);
            }
            BattleEvent::DamageDealt {
                side,
                target,
                amount,
                critical,
                effectiveness,
                ..
            } => {
                self.damage_dealt[side.index()] += *amount as u64;
                self.damage_received[target.index()] += *amount as u64;
                if *critical {
                    self.critical_hits[side.index()] += 1;
                }
                *self.effectiveness.entry(*effectiveness).or_insert(0) += 1;
            }
            BattleEvent::RecoilDamage { side, amount, .. }
            | BattleEvent::StatusDamage { side, amount, .. } => {
                self.damage_received[side.index()] += *amount as u64;
            }
            _ => {}
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn dealt(&self, side: Side) -> u64 {
        self.damage_dealt[side.index()]
    }

    pub fn received(&self, side: Side) -> u64 {
        self.damage_received[side.index()]
    }

    pub fn crits(&self, side: Side) -> u32 {
        self.critical_hits[side.index()]
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            turns: self.total_turns,
            player_damage: self.dealt(Side::Player),
            opponent_damage: self.dealt(Side::Opponent),
            player_crits: self.crits(Side::Player),
            opponent_crits: self.crits(Side::Opponent),
            duration_ms: self.duration.map(|d| d.as_millis() as u64),
        }
    }
}
