pub mod core;
pub mod data;

pub use crate::core::{
    analytics::{BattleStats, StatsSnapshot},
    battle::{is_battle_over, resolve_turn, BattleEngine, BattleOptions, TurnResult},
    damage::{compute_damage, DamageCategory, DamageInput},
    error::{BattleError, CatalogError},
    events::{apply_event, describe, BattleEvent},
    factory::{build_moveset, create_pokemon, normalize_move, normalize_pokemon},
    replay::replay_battle,
    rng::{RandomSource, RecordingRandom, ScriptedRandom, SeededRandom},
    state::{
        create_battle_state, Action, BaseStats, BattleHistory, BattleState, BattleTurn, Combatant,
        Move, MoveCategory, Outcome, Pokemon, Side,
    },
    statuses::{MajorStatus, StatusKind},
};
pub use crate::data::{
    moves::{MoveDatabase, MoveRecord},
    species::{SpeciesDatabase, SpeciesRecord},
    type_chart::{effectiveness, Effectiveness, ElementType},
};

#[cfg(target_arch = "wasm32")]
pub mod wasm;
