use crate::core::battle::{BattleEngine, BattleOptions};
use crate::core::error::{BattleError, Result};
use crate::core::rng::ScriptedRandom;
use crate::core::state::{BattleHistory, BattleState};

/// Re-resolves every recorded turn from `initial` using the recorded draws.
///
/// Fails if a turn consumes a different number of draws or produces a
/// different event log than the one recorded.
pub fn replay_battle(initial: &BattleState, history: &BattleHistory) -> Result<BattleState> {
    let engine = BattleEngine::new(BattleOptions {
        record_history: false,
    });
    let mut next = initial.clone();
    for turn in &history.turns {
        let mut rng = ScriptedRandom::new(turn.rng.clone());
        let result = engine.resolve_turn(&next, turn.actions[0], turn.actions[1], &mut rng)?;
        if rng.consumed() != turn.rng.len() {
            return Err(BattleError::ReplayDiverged {
                turn: turn.turn,
                reason: format!(
                    "consumed {} draws, recorded {}",
                    rng.consumed(),
                    turn.rng.len()
                ),
            });
        }
        if result.events != turn.events {
            return Err(BattleError::ReplayDiverged {
                turn: turn.turn,
                reason: "event log differs from the recording".to_string(),
            });
        }
        next = result.state;
    }
    Ok(next)
}
