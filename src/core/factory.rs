//! Maps catalog records into the engine's value types.

use std::collections::HashSet;

use crate::core::error::CatalogError;
use crate::core::state::{
    BaseStats, EffectKind, EffectTarget, Move, MoveCategory, MoveEffect, Pokemon, StatChange,
    StatKind, MAX_MOVES,
};
use crate::core::statuses::StatusKind;
use crate::data::moves::{MoveDatabase, MoveRecord};
use crate::data::species::{SpeciesDatabase, SpeciesRecord};
use crate::data::type_chart::ElementType;

const STAT_NAMES: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

fn base_stat(record: &SpeciesRecord, stat: &'static str) -> Result<u32, CatalogError> {
    record
        .stats
        .iter()
        .find(|entry| entry.stat.name.replace('_', "-") == stat)
        .map(|entry| entry.base_stat)
        .ok_or_else(|| CatalogError::MissingStat {
            record: record.name.clone(),
            stat,
        })
}

pub fn normalize_pokemon(
    record: &SpeciesRecord,
    ability_override: Option<&str>,
) -> Result<Pokemon, CatalogError> {
    let [hp, attack, defense, special_attack, special_defense, speed] = STAT_NAMES;
    let base_stats = BaseStats {
        hp: base_stat(record, hp)?,
        attack: base_stat(record, attack)?,
        defense: base_stat(record, defense)?,
        special_attack: base_stat(record, special_attack)?,
        special_defense: base_stat(record, special_defense)?,
        speed: base_stat(record, speed)?,
    };

    let mut slots: Vec<_> = record.types.iter().collect();
    slots.sort_by_key(|entry| entry.slot);
    if slots.is_empty() || slots.len() > 2 {
        return Err(CatalogError::InvalidTypeCount {
            record: record.name.clone(),
            count: slots.len(),
        });
    }
    let types = slots
        .iter()
        .map(|entry| entry.kind.name.parse::<ElementType>())
        .collect::<Result<Vec<_>, _>>()?;

    let ability = match ability_override {
        Some(name) => Some(name.to_string()),
        None => {
            let mut abilities: Vec<_> = record.abilities.iter().collect();
            abilities.sort_by_key(|entry| (entry.is_hidden, entry.slot));
            abilities.first().map(|entry| entry.ability.name.clone())
        }
    };

    Ok(Pokemon {
        id: record.id,
        name: record.name.clone(),
        types,
        base_stats,
        ability,
        moves: Vec::new(),
        learnable: record.moves.iter().map(|m| m.entry.name.clone()).collect(),
    })
}

fn parse_category(record: &MoveRecord) -> Result<MoveCategory, CatalogError> {
    match record.damage_class.name.as_str() {
        "physical" => Ok(MoveCategory::Physical),
        "special" => Ok(MoveCategory::Special),
        "status" => Ok(MoveCategory::Status),
        other => Err(CatalogError::UnknownDamageClass {
            record: record.name.clone(),
            class: other.to_string(),
        }),
    }
}

fn parse_ailment(name: &str) -> Option<StatusKind> {
    match name {
        "burn" => Some(StatusKind::Burn),
        "poison" => Some(StatusKind::Poison),
        "paralysis" => Some(StatusKind::Paralysis),
        "sleep" => Some(StatusKind::Sleep),
        "freeze" => Some(StatusKind::Freeze),
        _ => None,
    }
}

fn parse_stage_stat(name: &str) -> Option<StatKind> {
    match name.replace('_', "-").as_str() {
        "attack" => Some(StatKind::Attack),
        "defense" => Some(StatKind::Defense),
        "special-attack" => Some(StatKind::SpecialAttack),
        "special-defense" => Some(StatKind::SpecialDefense),
        "speed" => Some(StatKind::Speed),
        "accuracy" => Some(StatKind::Accuracy),
        _ => None,
    }
}

/// A zero chance in the catalog means "not rolled"; fall back to the
/// record-wide chance, and to always-on when neither is set.
fn effect_chance(specific: u8, record: &MoveRecord) -> Option<u8> {
    if specific > 0 {
        return Some(specific.min(100));
    }
    record.effect_chance.filter(|c| *c > 0).map(|c| c.min(100))
}

/// Picks the single secondary effect the engine models. Status infliction
/// wins over stat changes, which win over drain/recoil, then healing.
fn parse_effect(record: &MoveRecord) -> Option<MoveEffect> {
    let meta = record.meta.clone().unwrap_or_default();

    if let Some(status) = meta.ailment.as_ref().and_then(|a| parse_ailment(&a.name)) {
        return Some(MoveEffect {
            chance: effect_chance(meta.ailment_chance, record),
            kind: EffectKind::InflictStatus { status },
        });
    }

    let changes: Vec<StatChange> = record
        .stat_changes
        .iter()
        .filter(|entry| entry.change != 0)
        .filter_map(|entry| {
            parse_stage_stat(&entry.stat.name).map(|stat| StatChange {
                stat,
                stages: entry.change,
            })
        })
        .collect();
    if !changes.is_empty() {
        let raises_user = meta
            .category
            .as_ref()
            .map_or(false, |c| c.name == "damage+raise");
        let target = match record.target.as_ref().map(|t| t.name.as_str()) {
            _ if raises_user => EffectTarget::User,
            Some(name) if name.starts_with("user") => EffectTarget::User,
            _ => EffectTarget::Opponent,
        };
        return Some(MoveEffect {
            chance: effect_chance(meta.stat_chance, record),
            kind: EffectKind::StatChange { target, changes },
        });
    }

    let percent = |value: i16| value.unsigned_abs().min(100) as u8;
    if meta.drain > 0 {
        return Some(MoveEffect {
            chance: None,
            kind: EffectKind::Drain {
                percent: percent(meta.drain),
            },
        });
    }
    if meta.drain < 0 {
        return Some(MoveEffect {
            chance: None,
            kind: EffectKind::Recoil {
                percent: percent(meta.drain),
            },
        });
    }
    if meta.healing > 0 {
        return Some(MoveEffect {
            chance: None,
            kind: EffectKind::Heal {
                percent: percent(meta.healing),
            },
        });
    }
    None
}

pub fn normalize_move(record: &MoveRecord) -> Result<Move, CatalogError> {
    let category = parse_category(record)?;
    let element = record.element.name.parse::<ElementType>()?;
    let power = match category {
        MoveCategory::Status => None,
        _ => record.power.filter(|p| *p > 0),
    };
    Ok(Move {
        id: record.id,
        name: record.name.clone(),
        element,
        power,
        accuracy: record.accuracy.map(|a| a.min(100)),
        pp: record.pp,
        priority: record.priority,
        category,
        effect: parse_effect(record),
    })
}

/// Checks a requested move list against the catalog and the species'
/// learnable list.
pub fn validate_moves(
    pokemon: &Pokemon,
    requested: &[&str],
    move_db: &MoveDatabase,
) -> Result<(), CatalogError> {
    if requested.is_empty() || requested.len() > MAX_MOVES {
        return Err(CatalogError::InvalidMoveset {
            species: pokemon.name.clone(),
            reason: format!("expected 1 to {} moves, got {}", MAX_MOVES, requested.len()),
        });
    }

    let mut seen = HashSet::new();
    for name in requested {
        if !seen.insert(*name) {
            return Err(CatalogError::InvalidMoveset {
                species: pokemon.name.clone(),
                reason: format!("'{}' listed twice", name),
            });
        }
    }

    if let Some(unknown) = requested.iter().find(|name| move_db.get(name).is_none()) {
        return Err(CatalogError::UnknownMove(unknown.to_string()));
    }

    if !pokemon.learnable.is_empty() {
        let learnable: HashSet<&str> = pokemon.learnable.iter().map(String::as_str).collect();
        if let Some(invalid) = requested.iter().find(|name| !learnable.contains(*name)) {
            return Err(CatalogError::MoveNotLearnable {
                species: pokemon.name.clone(),
                move_name: invalid.to_string(),
            });
        }
    }
    Ok(())
}

/// Returns `pokemon` carrying exactly the named moves, in order.
pub fn build_moveset(
    mut pokemon: Pokemon,
    names: &[&str],
    move_db: &MoveDatabase,
) -> Result<Pokemon, CatalogError> {
    validate_moves(&pokemon, names, move_db)?;
    pokemon.moves = names
        .iter()
        .filter_map(|name| move_db.get(name))
        .map(normalize_move)
        .collect::<Result<_, _>>()?;
    Ok(pokemon)
}

/// Looks up a species by name and equips it in one step.
pub fn create_pokemon(
    species_db: &SpeciesDatabase,
    move_db: &MoveDatabase,
    species: &str,
    moves: &[&str],
    ability: Option<&str>,
) -> Result<Pokemon, CatalogError> {
    let record = species_db
        .get(species)
        .ok_or_else(|| CatalogError::UnknownSpecies(species.to_string()))?;
    let pokemon = normalize_pokemon(record, ability)?;
    build_moveset(pokemon, moves, move_db)
}
