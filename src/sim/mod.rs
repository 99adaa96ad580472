//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame deltas and commands are the only inputs
//! - Injected random source only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{creature_at, player_hits_obstacle, player_near_creature, point_in_creature};
pub use input::{Command, InputOutcome, apply_command};
pub use rng::{RandomSource, ScriptedRandom, SimRng};
pub use state::{Creature, GameEvent, GameState, Obstacle, Player, SessionTotals};
pub use tick::tick;
