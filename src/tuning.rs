//! Data-driven game balance
//!
//! Every gameplay number lives here so a page can override it with a JSON blob.
//! Missing fields fall back to the defaults field by field.

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;

/// Balance table for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Logical canvas width (px)
    pub world_width: f32,
    /// Logical canvas height (px)
    pub world_height: f32,
    /// Lane centres as fractions of the world width
    pub lane_fractions: [f32; LANE_COUNT],

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Distance from the bottom edge to the player's resting y
    pub ground_offset: f32,
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_velocity: f32,
    /// Fraction of the remaining lane distance covered per frame
    pub lane_easing: f32,

    // === Pace ===
    /// Scroll speed at start (px/s)
    pub start_speed: f32,
    /// Speed added after each spawn check
    pub speed_step: f32,
    /// Score gained per pixel of distance
    pub score_per_distance: f64,

    // === Spawning ===
    /// Milliseconds between spawn checks
    pub spawn_interval_ms: f32,
    pub creature_spawn_chance: f32,
    pub obstacle_spawn_chance: f32,
    /// Creature spawn height above the bottom edge
    pub creature_base_offset: f32,
    /// Random extra height for creatures
    pub creature_height_jitter: f32,
    pub creature_min_size: f32,
    pub creature_size_jitter: f32,
    /// Distance from the bottom edge to an obstacle's y
    pub obstacle_offset: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,

    // === Proximity catch ===
    pub proximity_dx: f32,
    pub proximity_dy: f32,
    pub proximity_catch_chance: f32,
    pub proximity_catch_reward: f64,
    pub proximity_catch_penalty: f64,

    // === Tap catch ===
    pub tap_catch_chance: f32,
    pub tap_catch_reward: f64,
    pub tap_catch_penalty: f64,

    // === Obstacles ===
    /// Vertical distance within which a grounded player hits an obstacle
    pub obstacle_tolerance: f32,
    pub obstacle_speed_penalty: f32,
    /// Speed never drops below this from obstacle hits
    pub min_speed: f32,
    pub obstacle_score_penalty: f64,

    // === Cosmetic ===
    /// Creature bob amplitude per frame
    pub bob_amplitude: f32,
    /// Bob period divisor (ms)
    pub bob_period_ms: f32,
    /// Phase offset between neighbouring creatures (ms)
    pub bob_phase_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 480.0,
            world_height: 800.0,
            lane_fractions: [0.25, 0.5, 0.75],

            player_width: 46.0,
            player_height: 80.0,
            ground_offset: 120.0,
            gravity: 0.6,
            jump_velocity: -10.0,
            lane_easing: 0.25,

            start_speed: 180.0,
            speed_step: 3.0,
            score_per_distance: 0.02,

            spawn_interval_ms: 1400.0,
            creature_spawn_chance: 0.6,
            obstacle_spawn_chance: 0.4,
            creature_base_offset: 180.0,
            creature_height_jitter: 80.0,
            creature_min_size: 44.0,
            creature_size_jitter: 30.0,
            obstacle_offset: 110.0,
            obstacle_width: 60.0,
            obstacle_height: 40.0,

            proximity_dx: 50.0,
            proximity_dy: 60.0,
            proximity_catch_chance: 0.6,
            proximity_catch_reward: 100.0,
            proximity_catch_penalty: 5.0,

            tap_catch_chance: 0.75,
            tap_catch_reward: 80.0,
            tap_catch_penalty: 10.0,

            obstacle_tolerance: 50.0,
            obstacle_speed_penalty: 30.0,
            min_speed: 120.0,
            obstacle_score_penalty: 30.0,

            bob_amplitude: 0.2,
            bob_period_ms: 300.0,
            bob_phase_ms: 100.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table
    ///
    /// Unusable periods and intervals fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Replace non-positive or non-finite timings with the defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let timings = [
            ("spawn_interval_ms", &mut self.spawn_interval_ms, defaults.spawn_interval_ms),
            ("bob_period_ms", &mut self.bob_period_ms, defaults.bob_period_ms),
        ];
        for (name, value, default) in timings {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Tuning {} must be positive, got {}; using {}", name, value, default);
                *value = default;
            }
        }
        self
    }

    /// X coordinate of a lane centre
    pub fn lane_x(&self, lane: usize) -> f32 {
        let lane = lane.min(LANE_COUNT - 1);
        self.world_width * self.lane_fractions[lane]
    }

    /// Player resting y
    pub fn ground_y(&self) -> f32 {
        self.world_height - self.ground_offset
    }

    /// Element id of the optional JSON override in the page
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "tuning";

    /// Load tuning from the page's `#tuning` script element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from page");
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring malformed tuning: {}", e),
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "start_speed": 240.0, "tap_catch_chance": 0.5 }"#)
            .expect("valid json");
        assert_eq!(tuning.start_speed, 240.0);
        assert_eq!(tuning.tap_catch_chance, 0.5);
        assert_eq!(tuning.spawn_interval_ms, 1400.0);
        assert_eq!(tuning.proximity_catch_reward, 100.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ start_speed: ").is_err());
    }

    #[test]
    fn test_non_positive_timings_fall_back() {
        let tuning = Tuning::from_json(r#"{ "bob_period_ms": 0.0, "spawn_interval_ms": -50.0 }"#)
            .expect("valid json");
        assert_eq!(tuning.bob_period_ms, 300.0);
        assert_eq!(tuning.spawn_interval_ms, 1400.0);

        let tuning = Tuning::from_json(r#"{ "bob_period_ms": 450.0 }"#).expect("valid json");
        assert_eq!(tuning.bob_period_ms, 450.0);
    }

    #[test]
    fn test_zero_bob_period_keeps_creatures_catchable() {
        use crate::sim::{Command, GameState, InputOutcome, ScriptedRandom, apply_command, tick};

        let tuning = Tuning::from_json(r#"{ "bob_period_ms": 0.0 }"#).expect("valid json");
        let mut state = GameState::new(tuning);
        let id = state.spawn_creature(0, 400.0, 50.0);
        let mut rng = ScriptedRandom::always(0.0);
        tick(&mut state, 16.0, &mut rng);

        let pos = state.creatures[0].pos;
        assert!(pos.y.is_finite());
        assert_eq!(
            apply_command(&mut state, Command::Tap(pos), &mut rng),
            InputOutcome::Caught { id }
        );
    }

    #[test]
    fn test_lane_positions() {
        let tuning = Tuning::default();
        assert_eq!(tuning.lane_x(0), 120.0);
        assert_eq!(tuning.lane_x(1), 240.0);
        assert_eq!(tuning.lane_x(2), 360.0);
        // Out of range lanes clamp to the last lane
        assert_eq!(tuning.lane_x(7), 360.0);
        assert_eq!(tuning.ground_y(), 680.0);
    }
}
