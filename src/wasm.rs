use crate::core::analytics::BattleStats;
use crate::core::battle::{BattleEngine, BattleOptions};
use crate::core::events::{describe, BattleEvent};
use crate::core::factory::{normalize_move, normalize_pokemon};
use crate::core::replay::replay_battle;
use crate::core::rng::{RandomSource, SeededRandom};
use crate::core::state::{create_battle_state, Action, BattleHistory, BattleState, Pokemon};
use crate::data::moves::MoveRecord;
use crate::data::species::SpeciesRecord;
use js_sys::Math;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOptionsWire {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    record_history: Option<bool>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TurnResultWire {
    state: BattleState,
    events: Vec<BattleEvent>,
}

fn js_err(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn optional<T: for<'de> Deserialize<'de> + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        serde_wasm_bindgen::from_value(value).map_err(js_err)
    }
}

#[wasm_bindgen(js_name = normalizePokemon)]
pub fn normalize_pokemon_wasm(
    record: JsValue,
    ability_override: Option<String>,
) -> Result<JsValue, JsValue> {
    let record: SpeciesRecord = serde_wasm_bindgen::from_value(record).map_err(js_err)?;
    let pokemon = normalize_pokemon(&record, ability_override.as_deref()).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&pokemon).map_err(js_err)
}

#[wasm_bindgen(js_name = normalizeMove)]
pub fn normalize_move_wasm(record: JsValue) -> Result<JsValue, JsValue> {
    let record: MoveRecord = serde_wasm_bindgen::from_value(record).map_err(js_err)?;
    let mv = normalize_move(&record).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&mv).map_err(js_err)
}

#[wasm_bindgen(js_name = createBattle)]
pub fn create_battle_wasm(player: JsValue, opponent: JsValue) -> Result<JsValue, JsValue> {
    let player: Pokemon = serde_wasm_bindgen::from_value(player).map_err(js_err)?;
    let opponent: Pokemon = serde_wasm_bindgen::from_value(opponent).map_err(js_err)?;
    let state = create_battle_state(player, opponent).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&state).map_err(js_err)
}

/// Resolves one turn. Without a `seed` option the turn draws from
/// `Math.random`; the draws still land in the state's history.
#[wasm_bindgen(js_name = resolveTurn)]
pub fn resolve_turn_wasm(
    state: JsValue,
    player_action: JsValue,
    opponent_action: JsValue,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let state: BattleState = serde_wasm_bindgen::from_value(state).map_err(js_err)?;
    let player_action: Action = serde_wasm_bindgen::from_value(player_action).map_err(js_err)?;
    let opponent_action: Action =
        serde_wasm_bindgen::from_value(opponent_action).map_err(js_err)?;
    let options: ResolveOptionsWire = optional(options)?;

    let engine = BattleEngine::new(BattleOptions {
        record_history: options.record_history.unwrap_or(true),
    });
    let mut seeded;
    let mut js_random = || Math::random();
    let rng: &mut dyn RandomSource = match options.seed {
        Some(seed) => {
            seeded = SeededRandom::new(seed);
            &mut seeded
        }
        None => &mut js_random,
    };
    let result = engine
        .resolve_turn(&state, player_action, opponent_action, rng)
        .map_err(js_err)?;
    serde_wasm_bindgen::to_value(&TurnResultWire {
        state: result.state,
        events: result.events,
    })
    .map_err(js_err)
}

#[wasm_bindgen(js_name = isBattleOver)]
pub fn is_battle_over_wasm(state: JsValue) -> Result<bool, JsValue> {
    let state: BattleState = serde_wasm_bindgen::from_value(state).map_err(js_err)?;
    Ok(state.is_over())
}

#[wasm_bindgen(js_name = foldStats)]
pub fn fold_stats_wasm(events: JsValue) -> Result<JsValue, JsValue> {
    let events: Vec<BattleEvent> = serde_wasm_bindgen::from_value(events).map_err(js_err)?;
    let stats = BattleStats::from_events(&events);
    serde_wasm_bindgen::to_value(&stats.snapshot()).map_err(js_err)
}

#[wasm_bindgen(js_name = describeEvents)]
pub fn describe_events_wasm(
    events: JsValue,
    player_name: String,
    opponent_name: String,
) -> Result<Vec<String>, JsValue> {
    let events: Vec<BattleEvent> = serde_wasm_bindgen::from_value(events).map_err(js_err)?;
    Ok(events
        .iter()
        .map(|e| describe(e, [&player_name, &opponent_name]))
        .collect())
}

#[wasm_bindgen(js_name = replayBattle)]
pub fn replay_battle_wasm(initial: JsValue, history: JsValue) -> Result<JsValue, JsValue> {
    let initial: BattleState = serde_wasm_bindgen::from_value(initial).map_err(js_err)?;
    let history: BattleHistory = serde_wasm_bindgen::from_value(history).map_err(js_err)?;
    let state = replay_battle(&initial, &history).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&state).map_err(js_err)
}
