#![allow(dead_code)]

use duel_engine::core::state::{
    create_battle_state, BaseStats, BattleState, EffectKind, Move, MoveCategory, MoveEffect,
    Pokemon,
};
use duel_engine::data::type_chart::ElementType;

pub fn stats(hp: u32, attack: u32, defense: u32, speed: u32) -> BaseStats {
    BaseStats {
        hp,
        attack,
        defense,
        special_attack: attack,
        special_defense: defense,
        speed,
    }
}

pub fn attack(id: u32, name: &str, element: ElementType, power: u16) -> Move {
    Move {
        id,
        name: name.to_string(),
        element,
        power: Some(power),
        accuracy: Some(100),
        pp: Some(35),
        priority: 0,
        category: MoveCategory::Physical,
        effect: None,
    }
}

pub fn status_move(id: u32, name: &str, element: ElementType, effect: EffectKind) -> Move {
    Move {
        id,
        name: name.to_string(),
        element,
        power: None,
        accuracy: None,
        pp: Some(20),
        priority: 0,
        category: MoveCategory::Status,
        effect: Some(MoveEffect { chance: None, kind: effect }),
    }
}

pub fn tackle() -> Move {
    attack(33, "tackle", ElementType::Normal, 40)
}

pub fn pokemon(name: &str, types: &[ElementType], base_stats: BaseStats, moves: Vec<Move>) -> Pokemon {
    Pokemon {
        id: 0,
        name: name.to_string(),
        types: types.to_vec(),
        base_stats,
        ability: None,
        moves,
        learnable: Vec::new(),
    }
}

/// Two plain normal-type combatants, the player slightly faster.
pub fn basic_battle() -> BattleState {
    let player = pokemon(
        "alpha",
        &[ElementType::Normal],
        stats(100, 100, 50, 60),
        vec![tackle()],
    );
    let opponent = pokemon(
        "beta",
        &[ElementType::Normal],
        stats(100, 100, 50, 50),
        vec![tackle()],
    );
    create_battle_state(player, opponent).expect("valid combatants")
}
