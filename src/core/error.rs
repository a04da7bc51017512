//! Error types for the engine and the catalog normalizer.

use thiserror::Error;

use crate::core::state::Side;

/// Contract violations raised by the turn resolver.
///
/// These are programming errors on the caller's side: the engine never
/// coerces an invalid action into a valid one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("battle is already over after turn {turn}")]
    BattleOver { turn: u32 },

    #[error("{side} does not know move {move_id}")]
    MoveNotOwned { side: Side, move_id: u32 },

    #[error("{side} has no PP left for move {move_id}")]
    NoPpRemaining { side: Side, move_id: u32 },

    #[error("invalid combatant for {side}: {reason}")]
    InvalidCombatant { side: Side, reason: String },

    #[error("replay diverged at turn {turn}: {reason}")]
    ReplayDiverged { turn: u32, reason: String },
}

/// Failures while mapping external catalog records into engine values.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("record '{record}' is missing base stat '{stat}'")]
    MissingStat { record: String, stat: &'static str },

    #[error("unknown element type '{0}'")]
    UnknownType(String),

    #[error("record '{record}' has {count} types, expected 1 or 2")]
    InvalidTypeCount { record: String, count: usize },

    #[error("move '{record}' has unknown damage class '{class}'")]
    UnknownDamageClass { record: String, class: String },

    #[error("unknown species '{0}'")]
    UnknownSpecies(String),

    #[error("unknown move '{0}'")]
    UnknownMove(String),

    #[error("'{species}' cannot learn '{move_name}'")]
    MoveNotLearnable { species: String, move_name: String },

    #[error("invalid move set for '{species}': {reason}")]
    InvalidMoveset { species: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BattleError>;
