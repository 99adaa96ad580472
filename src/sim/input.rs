//! Player commands applied between frames
//!
//! Buttons, keys and pointer taps all reduce to a `Command`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::creature_at;
use super::rng::RandomSource;
use super::state::{GameEvent, GameState};
use crate::clamp_lane;

/// A single player command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    LaneLeft,
    LaneRight,
    Jump,
    /// Tap/click at a point in logical canvas coordinates
    Tap(Vec2),
}

/// What a command ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Lane changed (or stayed put at an edge)
    Moved { lane: usize },
    Jumped,
    /// Jump requested while airborne
    Ignored,
    /// Tap caught the creature with this id
    Caught { id: u32 },
    /// Tap hit the creature but it got away
    Missed { id: u32 },
}

/// Apply a command to the game state
pub fn apply_command(state: &mut GameState, command: Command, rng: &mut impl RandomSource) -> InputOutcome {
    match command {
        Command::LaneLeft => shift_lane(state, -1),
        Command::LaneRight => shift_lane(state, 1),
        Command::Jump => jump(state),
        Command::Tap(point) => match creature_at(&state.creatures, point) {
            Some(index) => tap_catch(state, index, rng),
            None => jump(state),
        },
    }
}

fn shift_lane(state: &mut GameState, delta: i32) -> InputOutcome {
    let lane = clamp_lane(state.player.lane as i32 + delta);
    state.player.lane = lane;
    InputOutcome::Moved { lane }
}

fn jump(state: &mut GameState) -> InputOutcome {
    if state.player.jump(state.tuning.jump_velocity) {
        state.emit(GameEvent::Jumped);
        InputOutcome::Jumped
    } else {
        InputOutcome::Ignored
    }
}

/// Resolve a tap on the creature at `index`
fn tap_catch(state: &mut GameState, index: usize, rng: &mut impl RandomSource) -> InputOutcome {
    let id = state.creatures[index].id;
    if rng.roll(state.tuning.tap_catch_chance) {
        let reward = state.tuning.tap_catch_reward;
        state.creatures.remove(index);
        state.totals.caught += 1;
        state.totals.reward(reward);
        log::debug!("Tapped and caught creature {}", id);
        state.emit(GameEvent::CreatureCaught {
            id,
            reward,
            by_tap: true,
        });
        InputOutcome::Caught { id }
    } else {
        let penalty = state.tuning.tap_catch_penalty;
        state.totals.penalize(penalty);
        log::debug!("Tap on creature {} missed", id);
        state.emit(GameEvent::CatchFailed {
            id,
            penalty,
            by_tap: true,
        });
        InputOutcome::Missed { id }
    }
}
