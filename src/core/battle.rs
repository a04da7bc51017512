use tracing::{debug, trace};

use crate::core::damage::{roll_damage, DamageCategory};
use crate::core::error::{BattleError, Result};
use crate::core::events::{apply_event, BattleEvent};
use crate::core::rng::{RandomSource, RecordingRandom};
use crate::core::state::{
    validate_state, Action, BattleHistory, BattleState, BattleTurn, EffectKind, EffectTarget, Move,
    MoveEffect, Outcome, Side, StatKind,
};
use crate::core::statuses::{inflict, run_status_hook, StatusHook, StatusHookContext, StatusKind};
use crate::core::utils::{combatant_stat, hit_chance, ordering_speed};
use crate::data::type_chart::effectiveness;

#[derive(Clone, Debug)]
pub struct BattleOptions {
    pub record_history: bool,
}

impl Default for BattleOptions {
    fn default() -> Self {
        Self { record_history: true }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BattleEngine {
    pub options: BattleOptions,
}

/// State after the turn plus everything that happened, in playback order.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnResult {
    pub state: BattleState,
    pub events: Vec<BattleEvent>,
}

struct TurnContext<'a> {
    state: BattleState,
    events: Vec<BattleEvent>,
    rng: RecordingRandom<'a>,
}

impl TurnContext<'_> {
    fn emit(&mut self, event: BattleEvent) {
        apply_event(&mut self.state, &event);
        self.events.push(event);
    }
}

impl BattleEngine {
    pub fn new(options: BattleOptions) -> Self {
        Self { options }
    }

    pub fn resolve_turn(
        &self,
        state: &BattleState,
        player_action: Action,
        opponent_action: Action,
        rng: &mut dyn RandomSource,
    ) -> Result<TurnResult> {
        if state.is_over() || state.sides.iter().any(|s| s.combatant.is_fainted()) {
            return Err(BattleError::BattleOver { turn: state.turn });
        }
        validate_state(state)?;
        let actions = [player_action, opponent_action];
        let slots = [
            validate_action(state, Side::Player, &actions[0])?,
            validate_action(state, Side::Opponent, &actions[1])?,
        ];

        let mut ctx = TurnContext {
            state: state.clone(),
            events: Vec::new(),
            rng: RecordingRandom::new(rng),
        };
        let turn = state.turn + 1;
        let hp = ctx.state.hp();
        ctx.emit(BattleEvent::TurnStart { turn, hp });

        let order = action_order(&ctx.state, &actions);
        debug!(turn, ?order, "resolving turn");

        let mut slept = [false; 2];
        for side in order {
            if ctx.state.combatant(side).is_fainted() {
                continue;
            }
            let Some(slot) = slots[side.index()] else {
                continue;
            };

            let hook = run_status_hook(
                ctx.state.combatant(side),
                side,
                StatusHook::BeforeAction,
                StatusHookContext {
                    rng: &mut ctx.rng,
                    slept_this_turn: false,
                },
            );
            for event in hook.events {
                if let BattleEvent::CantMove {
                    status: StatusKind::Sleep,
                    ..
                } = event
                {
                    slept[side.index()] = true;
                }
                ctx.emit(event);
            }
            if hook.prevent_action {
                continue;
            }

            execute_move(&mut ctx, side, slot);
        }

        for side in Side::BOTH {
            if ctx.state.combatant(side).is_fainted() {
                continue;
            }
            let hook = run_status_hook(
                ctx.state.combatant(side),
                side,
                StatusHook::TurnEnd,
                StatusHookContext {
                    rng: &mut ctx.rng,
                    slept_this_turn: slept[side.index()],
                },
            );
            if let Some(status) = hook.replace {
                ctx.state.combatant_mut(side).status = Some(status);
            }
            for event in hook.events {
                ctx.emit(event);
            }
        }

        let TurnContext {
            mut state,
            events,
            rng,
        } = ctx;
        state.turn = turn;
        state.outcome = outcome_of(&state);
        debug!(turn, outcome = ?state.outcome, events = events.len(), "turn resolved");

        if self.options.record_history {
            let history = state.history.get_or_insert_with(BattleHistory::default);
            history.turns.push(BattleTurn {
                turn,
                actions,
                rng: rng.into_draws(),
                events: events.clone(),
            });
        }

        Ok(TurnResult { state, events })
    }
}

pub fn resolve_turn(
    state: &BattleState,
    player_action: Action,
    opponent_action: Action,
    rng: &mut dyn RandomSource,
) -> Result<TurnResult> {
    BattleEngine::default().resolve_turn(state, player_action, opponent_action, rng)
}

pub fn is_battle_over(state: &BattleState) -> bool {
    state.is_over()
}

/// Move slot the action will use, or `None` for a pass.
fn validate_action(state: &BattleState, side: Side, action: &Action) -> Result<Option<usize>> {
    let Action::UseMove { move_id } = *action else {
        return Ok(None);
    };
    let combatant = state.combatant(side);
    let slot = combatant
        .move_slot(move_id)
        .ok_or(BattleError::MoveNotOwned { side, move_id })?;
    if !combatant.has_pp(slot) {
        return Err(BattleError::NoPpRemaining { side, move_id });
    }
    Ok(Some(slot))
}

fn action_priority(state: &BattleState, side: Side, action: &Action) -> i8 {
    match action {
        Action::UseMove { move_id } => state
            .combatant(side)
            .pokemon
            .moves
            .iter()
            .find(|m| m.id == *move_id)
            .map_or(0, |m| m.priority),
        Action::Pass => 0,
    }
}

/// Priority first, then effective Speed; the player goes first on a full tie.
fn action_order(state: &BattleState, actions: &[Action; 2]) -> [Side; 2] {
    let key = |side: Side| {
        (
            action_priority(state, side, &actions[side.index()]),
            ordering_speed(state.combatant(side)),
        )
    };
    if key(Side::Opponent) > key(Side::Player) {
        [Side::Opponent, Side::Player]
    } else {
        [Side::Player, Side::Opponent]
    }
}

fn outcome_of(state: &BattleState) -> Option<Outcome> {
    let player_down = state.combatant(Side::Player).is_fainted();
    let opponent_down = state.combatant(Side::Opponent).is_fainted();
    match (player_down, opponent_down) {
        (true, true) => Some(Outcome::Draw),
        (true, false) => Some(Outcome::Winner(Side::Opponent)),
        (false, true) => Some(Outcome::Winner(Side::Player)),
        (false, false) => None,
    }
}

fn execute_move(ctx: &mut TurnContext<'_>, side: Side, slot: usize) {
    let mv: Move = ctx.state.combatant(side).pokemon.moves[slot].clone();
    ctx.emit(BattleEvent::MoveUsed {
        side,
        move_id: mv.id,
        move_name: mv.name.clone(),
    });

    let accuracy_stage = ctx.state.combatant(side).stages.accuracy;
    if let Some(chance) = hit_chance(mv.accuracy, accuracy_stage) {
        if chance < 100 && !ctx.rng.chance(chance, 100) {
            ctx.emit(BattleEvent::MoveMissed { side });
            return;
        }
    }

    let target = side.opponent();
    let mut dealt = 0;
    if let Some((power, category)) = mv.damaging() {
        let defender = ctx.state.combatant(target);
        if defender.is_fainted() {
            return;
        }
        let attacker = ctx.state.combatant(side);
        let matchup = effectiveness(mv.element, &defender.pokemon.types);
        let (offense, defense) = match category {
            DamageCategory::Physical => (StatKind::Attack, StatKind::Defense),
            DamageCategory::Special => (StatKind::SpecialAttack, StatKind::SpecialDefense),
        };
        let attack = combatant_stat(attacker, offense);
        let defense = combatant_stat(defender, defense);
        let defender_hp = defender.hp;

        let roll = roll_damage(attack, defense, power, matchup, category, &mut ctx.rng);
        let amount = roll.amount.min(defender_hp);
        let hp_after = defender_hp - amount;
        ctx.emit(BattleEvent::DamageDealt {
            side,
            target,
            amount,
            hp_after,
            critical: roll.critical,
            effectiveness: matchup,
        });
        if hp_after == 0 {
            ctx.emit(BattleEvent::Faint { side: target });
        }
        if matchup.is_immune() {
            return;
        }
        dealt = amount;
    }

    if let Some(effect) = &mv.effect {
        apply_secondary(ctx, side, effect, dealt);
    }
}

fn apply_secondary(ctx: &mut TurnContext<'_>, side: Side, effect: &MoveEffect, dealt: u32) {
    if let Some(chance) = effect.chance {
        if chance < 100 && !ctx.rng.percent(chance) {
            return;
        }
    }
    let target = side.opponent();
    match &effect.kind {
        EffectKind::InflictStatus { status } => {
            match inflict(ctx.state.combatant(target), *status, &mut ctx.rng) {
                Ok(applied) => ctx.emit(BattleEvent::StatusApplied {
                    side: target,
                    status: applied,
                }),
                Err(block) => trace!(?target, ?status, ?block, "status not applied"),
            }
        }
        EffectKind::StatChange {
            target: who,
            changes,
        } => {
            let affected = match who {
                EffectTarget::User => side,
                EffectTarget::Opponent => target,
            };
            if ctx.state.combatant(affected).is_fainted() {
                return;
            }
            for change in changes {
                let stages = ctx.state.combatant(affected).stages;
                let stage = stages.shifted(change.stat, change.stages);
                let delta = stage - stages.get(change.stat);
                if delta == 0 {
                    trace!(?affected, stat = ?change.stat, "stage already at limit");
                    continue;
                }
                ctx.emit(BattleEvent::StatChanged {
                    side: affected,
                    stat: change.stat,
                    delta,
                    stage,
                });
            }
        }
        EffectKind::Heal { percent } => {
            let max_hp = ctx.state.combatant(side).max_hp();
            restore(ctx, side, percent_of(max_hp, *percent));
        }
        EffectKind::Drain { percent } => {
            if dealt > 0 {
                restore(ctx, side, percent_of(dealt, *percent));
            }
        }
        EffectKind::Recoil { percent } => {
            let user = ctx.state.combatant(side);
            if dealt == 0 || user.is_fainted() {
                return;
            }
            let amount = percent_of(dealt, *percent).min(user.hp);
            let hp_after = user.hp - amount;
            ctx.emit(BattleEvent::RecoilDamage {
                side,
                amount,
                hp_after,
            });
            if hp_after == 0 {
                ctx.emit(BattleEvent::Faint { side });
            }
        }
        EffectKind::Cure => {
            if let Some(status) = ctx.state.combatant(side).status {
                ctx.emit(BattleEvent::StatusHealed {
                    side,
                    status: status.kind(),
                });
            }
        }
    }
}

fn percent_of(value: u32, percent: u8) -> u32 {
    (value as u64 * percent as u64 / 100).max(1) as u32
}

fn restore(ctx: &mut TurnContext<'_>, side: Side, amount: u32) {
    let user = ctx.state.combatant(side);
    let amount = amount.min(user.max_hp().saturating_sub(user.hp));
    if amount == 0 {
        return;
    }
    let hp_after = user.hp + amount;
    ctx.emit(BattleEvent::HpRestored {
        side,
        amount,
        hp_after,
    });
}
