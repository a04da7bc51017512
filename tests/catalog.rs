use duel_engine::core::error::CatalogError;
use duel_engine::core::factory::{build_moveset, create_pokemon, normalize_move, normalize_pokemon};
use duel_engine::core::state::{create_battle_state, EffectKind, EffectTarget, MoveCategory, StatKind};
use duel_engine::core::statuses::StatusKind;
use duel_engine::data::moves::{MoveDatabase, MoveRecord};
use duel_engine::data::species::{SpeciesDatabase, SpeciesRecord};
use duel_engine::data::type_chart::ElementType;
use serde_json::json;

fn pikachu_record() -> SpeciesRecord {
    serde_json::from_value(json!({
        "id": 25,
        "name": "pikachu",
        "stats": [
            { "base_stat": 35, "stat": { "name": "hp", "url": "https://example.invalid/stat/1/" } },
            { "base_stat": 55, "stat": { "name": "attack" } },
            { "base_stat": 40, "stat": { "name": "defense" } },
            { "base_stat": 50, "stat": { "name": "special-attack" } },
            { "base_stat": 50, "stat": { "name": "special-defense" } },
            { "base_stat": 90, "stat": { "name": "speed" } }
        ],
        "types": [ { "slot": 1, "type": { "name": "electric" } } ],
        "abilities": [
            { "ability": { "name": "lightning-rod" }, "is_hidden": true, "slot": 3 },
            { "ability": { "name": "static" }, "is_hidden": false, "slot": 1 }
        ],
        "moves": [
            { "move": { "name": "thunder-shock" } },
            { "move": { "name": "quick-attack" } }
        ]
    }))
    .unwrap()
}

fn move_record(value: serde_json::Value) -> MoveRecord {
    serde_json::from_value(value).unwrap()
}

#[test]
fn normalizes_a_species_record() {
    let pokemon = normalize_pokemon(&pikachu_record(), None).unwrap();
    assert_eq!(pokemon.id, 25);
    assert_eq!(pokemon.types, vec![ElementType::Electric]);
    assert_eq!(pokemon.base_stats.hp, 35);
    assert_eq!(pokemon.base_stats.special_attack, 50);
    assert_eq!(pokemon.base_stats.speed, 90);
    assert_eq!(pokemon.ability.as_deref(), Some("static"));
    assert_eq!(pokemon.learnable, vec!["thunder-shock", "quick-attack"]);
    assert!(pokemon.moves.is_empty());

    let overridden = normalize_pokemon(&pikachu_record(), Some("lightning-rod")).unwrap();
    assert_eq!(overridden.ability.as_deref(), Some("lightning-rod"));
}

#[test]
fn types_follow_slot_order() {
    let mut record = pikachu_record();
    record.types = serde_json::from_value(json!([
        { "slot": 2, "type": { "name": "flying" } },
        { "slot": 1, "type": { "name": "normal" } }
    ]))
    .unwrap();
    let pokemon = normalize_pokemon(&record, None).unwrap();
    assert_eq!(pokemon.types, vec![ElementType::Normal, ElementType::Flying]);
}

#[test]
fn rejects_broken_species_records() {
    let mut record = pikachu_record();
    record.stats.retain(|s| s.stat.name != "speed");
    assert!(matches!(
        normalize_pokemon(&record, None),
        Err(CatalogError::MissingStat { stat: "speed", .. })
    ));

    let mut record = pikachu_record();
    record.types.clear();
    assert!(matches!(
        normalize_pokemon(&record, None),
        Err(CatalogError::InvalidTypeCount { count: 0, .. })
    ));

    let mut record = pikachu_record();
    record.types[0].kind.name = "shadow".to_string();
    assert!(matches!(
        normalize_pokemon(&record, None),
        Err(CatalogError::UnknownType(_))
    ));
}

#[test]
fn status_moves_have_no_power() {
    let mv = normalize_move(&move_record(json!({
        "id": 86,
        "name": "thunder-wave",
        "type": { "name": "electric" },
        "damage_class": { "name": "status" },
        "power": null,
        "accuracy": 90,
        "pp": 20,
        "priority": 0,
        "meta": { "ailment": { "name": "paralysis" }, "ailment_chance": 0 }
    })))
    .unwrap();
    assert_eq!(mv.category, MoveCategory::Status);
    assert_eq!(mv.power, None);
    assert_eq!(mv.accuracy, Some(90));
    let effect = mv.effect.unwrap();
    assert_eq!(effect.chance, None);
    assert_eq!(
        effect.kind,
        EffectKind::InflictStatus {
            status: StatusKind::Paralysis
        }
    );
}

#[test]
fn secondary_chance_comes_from_meta() {
    let mv = normalize_move(&move_record(json!({
        "id": 52,
        "name": "ember",
        "type": { "name": "fire" },
        "damage_class": { "name": "special" },
        "power": 40,
        "accuracy": 100,
        "pp": 25,
        "effect_chance": 10,
        "meta": { "ailment": { "name": "burn" }, "ailment_chance": 10 }
    })))
    .unwrap();
    assert_eq!(mv.power, Some(40));
    assert_eq!(mv.effect.unwrap().chance, Some(10));
}

#[test]
fn missing_fields_become_explicit_absence() {
    let mv = normalize_move(&move_record(json!({
        "id": 33,
        "name": "tackle",
        "type": { "name": "normal" },
        "damage_class": { "name": "physical" },
        "power": 40
    })))
    .unwrap();
    assert_eq!(mv.accuracy, None);
    assert_eq!(mv.pp, None);
    assert_eq!(mv.priority, 0);
    assert!(mv.effect.is_none());
}

#[test]
fn stat_changes_target_user_or_foe() {
    let dance = normalize_move(&move_record(json!({
        "id": 14,
        "name": "swords-dance",
        "type": { "name": "normal" },
        "damage_class": { "name": "status" },
        "stat_changes": [ { "change": 2, "stat": { "name": "attack" } } ],
        "target": { "name": "user" }
    })))
    .unwrap();
    match dance.effect.unwrap().kind {
        EffectKind::StatChange { target, changes } => {
            assert_eq!(target, EffectTarget::User);
            assert_eq!(changes[0].stat, StatKind::Attack);
            assert_eq!(changes[0].stages, 2);
        }
        other => panic!("unexpected effect {:?}", other),
    }

    let growl = normalize_move(&move_record(json!({
        "id": 45,
        "name": "growl",
        "type": { "name": "normal" },
        "damage_class": { "name": "status" },
        "stat_changes": [ { "change": -1, "stat": { "name": "attack" } } ],
        "target": { "name": "all-opponents" }
    })))
    .unwrap();
    assert!(matches!(
        growl.effect.unwrap().kind,
        EffectKind::StatChange {
            target: EffectTarget::Opponent,
            ..
        }
    ));
}

#[test]
fn damage_raise_moves_boost_the_user() {
    let flame_charge = normalize_move(&move_record(json!({
        "id": 488,
        "name": "flame-charge",
        "type": { "name": "fire" },
        "damage_class": { "name": "physical" },
        "power": 50,
        "accuracy": 100,
        "pp": 20,
        "effect_chance": 100,
        "meta": { "category": { "name": "damage+raise" }, "stat_chance": 100 },
        "stat_changes": [ { "change": 1, "stat": { "name": "speed" } } ],
        "target": { "name": "selected-pokemon" }
    })))
    .unwrap();
    match flame_charge.effect.unwrap().kind {
        EffectKind::StatChange { target, changes } => {
            assert_eq!(target, EffectTarget::User);
            assert_eq!(changes[0].stat, StatKind::Speed);
            assert_eq!(changes[0].stages, 1);
        }
        other => panic!("unexpected effect {:?}", other),
    }

    let acid_spray = normalize_move(&move_record(json!({
        "id": 491,
        "name": "acid-spray",
        "type": { "name": "poison" },
        "damage_class": { "name": "special" },
        "power": 40,
        "meta": { "category": { "name": "damage+lower" }, "stat_chance": 100 },
        "stat_changes": [ { "change": -2, "stat": { "name": "special-defense" } } ],
        "target": { "name": "selected-pokemon" }
    })))
    .unwrap();
    assert!(matches!(
        acid_spray.effect.unwrap().kind,
        EffectKind::StatChange {
            target: EffectTarget::Opponent,
            ..
        }
    ));
}

#[test]
fn drain_sign_picks_drain_or_recoil() {
    let base = json!({
        "id": 71,
        "name": "absorb",
        "type": { "name": "grass" },
        "damage_class": { "name": "special" },
        "power": 20,
        "meta": { "drain": 50 }
    });
    let absorb = normalize_move(&move_record(base.clone())).unwrap();
    assert_eq!(absorb.effect.unwrap().kind, EffectKind::Drain { percent: 50 });

    let mut recoil = base;
    recoil["meta"]["drain"] = json!(-25);
    let take_down = normalize_move(&move_record(recoil)).unwrap();
    assert_eq!(take_down.effect.unwrap().kind, EffectKind::Recoil { percent: 25 });
}

#[test]
fn unknown_damage_class_is_an_error() {
    let result = normalize_move(&move_record(json!({
        "id": 1,
        "name": "odd",
        "type": { "name": "normal" },
        "damage_class": { "name": "mystery" }
    })));
    assert!(matches!(result, Err(CatalogError::UnknownDamageClass { .. })));
}

#[test]
fn bundled_catalog_loads() {
    let species = SpeciesDatabase::load_default().unwrap();
    let moves = MoveDatabase::load_default().unwrap();
    assert!(species.get("pikachu").is_some());
    assert!(moves.get("thunder-wave").is_some());

    // Every learnable move in the bundled species list is in the move list.
    for record in species.as_map().values() {
        for entry in &record.moves {
            assert!(
                moves.get(&entry.entry.name).is_some(),
                "{} lists unknown move {}",
                record.name,
                entry.entry.name
            );
        }
        normalize_pokemon(record, None).unwrap();
    }
    for record in moves.as_map().values() {
        normalize_move(record).unwrap();
    }
}

#[test]
fn json_and_yaml_loaders_agree() {
    let yaml = r#"
tackle:
  id: 33
  name: tackle
  type: { name: normal }
  damage_class: { name: physical }
  power: 40
  accuracy: 100
  pp: 35
"#;
    let json = r#"[{"id": 33, "name": "tackle", "type": {"name": "normal"},
        "damage_class": {"name": "physical"}, "power": 40, "accuracy": 100, "pp": 35}]"#;
    let from_yaml = MoveDatabase::load_from_yaml_str(yaml).unwrap();
    let from_json = MoveDatabase::load_from_json_str(json).unwrap();
    assert_eq!(from_yaml.get("tackle"), from_json.get("tackle"));
}

#[test]
fn builds_a_legal_moveset() {
    let species = SpeciesDatabase::load_default().unwrap();
    let moves = MoveDatabase::load_default().unwrap();

    let pikachu = create_pokemon(
        &species,
        &moves,
        "pikachu",
        &["thunder-shock", "quick-attack"],
        None,
    )
    .unwrap();
    assert_eq!(pikachu.moves.len(), 2);
    assert_eq!(pikachu.moves[0].element, ElementType::Electric);
    assert_eq!(pikachu.moves[1].priority, 1);

    let squirtle = create_pokemon(&species, &moves, "squirtle", &["water-gun"], None).unwrap();
    assert!(create_battle_state(pikachu, squirtle).is_ok());
}

#[test]
fn moveset_rules_are_enforced() {
    let species = SpeciesDatabase::load_default().unwrap();
    let moves = MoveDatabase::load_default().unwrap();
    let pikachu = normalize_pokemon(species.get("pikachu").unwrap(), None).unwrap();

    assert!(matches!(
        build_moveset(pikachu.clone(), &[], &moves),
        Err(CatalogError::InvalidMoveset { .. })
    ));
    assert!(matches!(
        build_moveset(pikachu.clone(), &["growl", "growl"], &moves),
        Err(CatalogError::InvalidMoveset { .. })
    ));
    assert!(matches!(
        build_moveset(
            pikachu.clone(),
            &["growl", "thunder-shock", "quick-attack", "body-slam", "take-down"],
            &moves
        ),
        Err(CatalogError::InvalidMoveset { .. })
    ));
    assert!(matches!(
        build_moveset(pikachu.clone(), &["splash"], &moves),
        Err(CatalogError::UnknownMove(_))
    ));
    assert!(matches!(
        build_moveset(pikachu, &["ember"], &moves),
        Err(CatalogError::MoveNotLearnable { .. })
    ));
    assert!(matches!(
        create_pokemon(&species, &moves, "missingno", &["tackle"], None),
        Err(CatalogError::UnknownSpecies(_))
    ));
}
