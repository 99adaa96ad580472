//! Per-frame simulation step
//!
//! Core game loop that advances the run by one display frame.

use super::collision::{player_hits_obstacle, player_near_creature};
use super::rng::RandomSource;
use super::state::{GameEvent, GameState};
use crate::consts::{LANE_COUNT, MAX_FRAME_MS};

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, dt_ms: f32, rng: &mut impl RandomSource) {
    // Non-finite deltas count as no time passing
    let dt = if dt_ms.is_finite() {
        dt_ms.clamp(0.0, MAX_FRAME_MS)
    } else {
        0.0
    };
    state.frame += 1;
    state.clock_ms += dt as f64;

    // Distance and a small score trickle proportional to speed
    let travelled = (state.totals.speed * dt / 1000.0) as f64;
    state.totals.distance += travelled;
    state.totals.score += travelled * state.tuning.score_per_distance;

    // Gravity, then ease toward the lane centre
    let ground_y = state.tuning.ground_y();
    state.player.fall(state.tuning.gravity, ground_y);
    let target_x = state.tuning.lane_x(state.player.lane);
    state.player.ease_toward(target_x, state.tuning.lane_easing);

    update_spawner(state, dt, rng);
    update_creatures(state, rng);
    update_obstacles(state);
}

/// Run the spawn check once the interval has elapsed
fn update_spawner(state: &mut GameState, dt: f32, rng: &mut impl RandomSource) {
    state.spawn_timer_ms += dt;
    if state.spawn_timer_ms <= state.tuning.spawn_interval_ms {
        return;
    }
    state.spawn_timer_ms = 0.0;

    if rng.roll(state.tuning.creature_spawn_chance) {
        let lane = rng.index(LANE_COUNT);
        let y = state.tuning.world_height
            - state.tuning.creature_base_offset
            - rng.next_unit() * state.tuning.creature_height_jitter;
        let size = state.tuning.creature_min_size + rng.next_unit() * state.tuning.creature_size_jitter;
        let id = state.spawn_creature(lane, y, size);
        log::debug!("Creature {} spawned in lane {}", id, lane);
    }

    if rng.roll(state.tuning.obstacle_spawn_chance) {
        let lane = rng.index(LANE_COUNT);
        let id = state.spawn_obstacle(lane);
        log::debug!("Obstacle {} spawned in lane {}", id, lane);
    }

    state.totals.speed += state.tuning.speed_step;
}

/// Bob creatures and resolve automatic catches, newest first
fn update_creatures(state: &mut GameState, rng: &mut impl RandomSource) {
    let tuning = &state.tuning;
    let (max_dx, max_dy) = (tuning.proximity_dx, tuning.proximity_dy);
    let (chance, reward, penalty) = (
        tuning.proximity_catch_chance,
        tuning.proximity_catch_reward,
        tuning.proximity_catch_penalty,
    );
    let (amplitude, period, phase) = (tuning.bob_amplitude, tuning.bob_period_ms, tuning.bob_phase_ms);

    for i in (0..state.creatures.len()).rev() {
        let bob_t = (state.clock_ms + i as f64 * phase as f64) / period as f64;
        let creature = &mut state.creatures[i];
        creature.pos.y += bob_t.sin() as f32 * amplitude;

        if !player_near_creature(&state.player, creature, max_dx, max_dy) {
            continue;
        }

        let id = creature.id;
        state.creatures.remove(i);
        if rng.roll(chance) {
            state.totals.caught += 1;
            state.totals.reward(reward);
            log::debug!("Caught creature {} on contact", id);
            state.emit(GameEvent::CreatureCaught {
                id,
                reward,
                by_tap: false,
            });
        } else {
            state.totals.penalize(penalty);
            log::debug!("Creature {} escaped on contact", id);
            state.emit(GameEvent::CatchFailed {
                id,
                penalty,
                by_tap: false,
            });
        }
    }
}

/// Resolve obstacle collisions, newest first
fn update_obstacles(state: &mut GameState) {
    let tolerance = state.tuning.obstacle_tolerance;
    for i in (0..state.obstacles.len()).rev() {
        if !player_hits_obstacle(&state.player, &state.obstacles[i], tolerance) {
            continue;
        }

        let obstacle = state.obstacles.remove(i);
        state.totals.speed = (state.totals.speed - state.tuning.obstacle_speed_penalty)
            .max(state.tuning.min_speed);
        state.totals.penalize(state.tuning.obstacle_score_penalty);
        log::debug!("Hit obstacle {} (speed now {})", obstacle.id, state.totals.speed);
        state.emit(GameEvent::ObstacleHit { id: obstacle.id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, SimRng};
    use crate::tuning::Tuning;

    /// Frames of `MAX_FRAME_MS` needed to pass one spawn interval
    fn frames_per_spawn(tuning: &Tuning) -> usize {
        (tuning.spawn_interval_ms / MAX_FRAME_MS).floor() as usize + 1
    }

    #[test]
    fn test_one_interval_spawns_one_of_each() {
        let mut state = GameState::default();
        assert_eq!(state.totals.speed, 180.0);
        let mut rng = ScriptedRandom::always(0.0);

        for _ in 0..frames_per_spawn(&state.tuning) {
            tick(&mut state, MAX_FRAME_MS, &mut rng);
        }

        assert_eq!(state.creatures.len(), 1);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.totals.speed, 183.0);
        assert_eq!(state.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_no_spawn_before_interval() {
        let mut state = GameState::default();
        let mut rng = ScriptedRandom::always(0.0);
        // 35 * 40 = 1400, not yet past the interval
        for _ in 0..35 {
            tick(&mut state, MAX_FRAME_MS, &mut rng);
        }
        assert!(state.creatures.is_empty());
        assert_eq!(rng.draws(), 0);
        assert_eq!(state.totals.speed, 180.0);
    }

    #[test]
    fn test_failed_spawn_rolls_still_speed_up() {
        let mut state = GameState::default();
        let mut rng = ScriptedRandom::always(0.99);
        for _ in 0..frames_per_spawn(&state.tuning) {
            tick(&mut state, MAX_FRAME_MS, &mut rng);
        }
        assert!(state.creatures.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.totals.speed, 183.0);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_dt_clamped() {
        let mut state = GameState::default();
        let mut rng = ScriptedRandom::always(0.99);
        tick(&mut state, 5000.0, &mut rng);
        assert_eq!(state.clock_ms, MAX_FRAME_MS as f64);
        assert_eq!(state.spawn_timer_ms, MAX_FRAME_MS);
        // 180 px/s for 40 ms
        assert!((state.totals.distance - 7.2).abs() < 1e-4);
        assert!((state.totals.score - 7.2 * 0.02).abs() < 1e-4);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut state = GameState::default();
        let mut rng = ScriptedRandom::always(0.99);
        tick(&mut state, -16.0, &mut rng);
        assert_eq!(state.totals.distance, 0.0);
        assert_eq!(state.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_lane_easing() {
        let mut state = GameState::default();
        let mut rng = ScriptedRandom::always(0.99);
        state.player.lane = 2;
        tick(&mut state, 16.0, &mut rng);
        // 240 + (360 - 240) * 0.25
        assert!((state.player.pos.x - 270.0).abs() < 1e-4);
        for _ in 0..60 {
            tick(&mut state, 16.0, &mut rng);
        }
        assert!((state.player.pos.x - 360.0).abs() < 0.01);
    }

    #[test]
    fn test_proximity_catch_success() {
        let mut state = GameState::default();
        let y = state.player.pos.y - 10.0;
        let id = state.spawn_creature(1, y, 50.0);
        state.drain_events();
        state.hud_dirty = false;

        let mut rng = ScriptedRandom::always(0.0);
        tick(&mut state, 16.0, &mut rng);

        assert!(state.creatures.is_empty());
        assert_eq!(state.totals.caught, 1);
        assert!(state.totals.score >= 100.0);
        assert!(state.hud_dirty);
        assert!(state.drain_events().contains(&GameEvent::CreatureCaught {
            id,
            reward: 100.0,
            by_tap: false,
        }));
    }

    #[test]
    fn test_proximity_catch_failure_removes_creature() {
        let mut state = GameState::default();
        let y = state.player.pos.y - 10.0;
        state.spawn_creature(1, y, 50.0);
        state.totals.score = 3.0;

        let mut rng = ScriptedRandom::always(0.99);
        tick(&mut state, 16.0, &mut rng);

        assert!(state.creatures.is_empty());
        assert_eq!(state.totals.caught, 0);
        // 3 + trickle - 5 floors at zero
        assert_eq!(state.totals.score, 0.0);

        // Gone for good: later frames roll nothing for it
        let draws = rng.draws();
        tick(&mut state, 16.0, &mut rng);
        assert_eq!(rng.draws(), draws);
    }

    #[test]
    fn test_obstacle_collision_penalties() {
        let mut state = GameState::default();
        state.totals.score = 50.0;
        state.totals.speed = 200.0;
        state.spawn_obstacle(1);

        let mut rng = ScriptedRandom::always(0.99);
        tick(&mut state, 0.0, &mut rng);

        assert!(state.obstacles.is_empty());
        assert_eq!(state.totals.speed, 170.0);
        assert!((state.totals.score - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_obstacle_penalties_floor() {
        let mut state = GameState::default();
        state.totals.score = 10.0;
        state.totals.speed = 130.0;
        state.spawn_obstacle(1);

        let mut rng = ScriptedRandom::always(0.99);
        tick(&mut state, 0.0, &mut rng);

        assert_eq!(state.totals.speed, 120.0);
        assert_eq!(state.totals.score, 0.0);
    }

    #[test]
    fn test_obstacle_jumped_over() {
        let mut state = GameState::default();
        state.spawn_obstacle(1);
        state.player.jump(state.tuning.jump_velocity);

        let mut rng = ScriptedRandom::always(0.99);
        tick(&mut state, 16.0, &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.totals.speed, 180.0);
    }

    #[test]
    fn test_obstacle_in_other_lane_ignored() {
        let mut state = GameState::default();
        state.spawn_obstacle(0);
        let mut rng = ScriptedRandom::always(0.99);
        tick(&mut state, 16.0, &mut rng);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed produce identical results
        let mut state1 = GameState::default();
        let mut state2 = GameState::default();
        let mut rng1 = SimRng::new(99999);
        let mut rng2 = SimRng::new(99999);

        for frame in 0..2000 {
            if frame % 90 == 0 {
                let lane = (frame / 90) % 3;
                state1.player.lane = lane;
                state2.player.lane = lane;
            }
            tick(&mut state1, 16.7, &mut rng1);
            tick(&mut state2, 16.7, &mut rng2);
        }

        assert_eq!(state1.totals.caught, state2.totals.caught);
        assert_eq!(state1.totals.score, state2.totals.score);
        assert_eq!(state1.totals.speed, state2.totals.speed);
        assert!(state1.totals.speed >= state1.tuning.min_speed);
        assert_eq!(state1.creatures.len(), state2.creatures.len());
        for (a, b) in state1.creatures.iter().zip(&state2.creatures) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        for (a, b) in state1.obstacles.iter().zip(&state2.obstacles) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn test_non_finite_dt_ignored() {
        let mut state = GameState::default();
        let mut rng = ScriptedRandom::always(0.99);
        tick(&mut state, f32::NAN, &mut rng);
        tick(&mut state, f32::INFINITY, &mut rng);
        tick(&mut state, f32::NEG_INFINITY, &mut rng);
        assert_eq!(state.frame, 3);
        assert_eq!(state.clock_ms, 0.0);
        assert_eq!(state.totals.distance, 0.0);
        assert_eq!(state.totals.score, 0.0);
        assert_eq!(state.spawn_timer_ms, 0.0);

        // A normal frame afterwards still advances the run
        tick(&mut state, 16.0, &mut rng);
        assert!(state.totals.score.is_finite());
        assert!(state.totals.distance > 0.0);
    }
}
