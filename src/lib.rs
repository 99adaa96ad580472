//! Lane Catcher - a three-lane endless runner with tap-to-catch creatures
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, catches, game state)
//! - `renderer`: Draw-list generation and Canvas2D backend
//! - `platform`: Browser/native platform abstraction (input mapping, host bridge)
//! - `report`: Score submission
//! - `tuning`: Data-driven game balance

pub mod hud;
pub mod platform;
pub mod renderer;
pub mod report;
pub mod sim;
pub mod tuning;

pub use hud::Hud;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (ms), avoids huge steps after a stall
    pub const MAX_FRAME_MS: f32 = 40.0;
    /// Delta used for the very first frame, before a previous timestamp exists
    pub const FIRST_FRAME_MS: f32 = 16.0;

    /// Number of lanes
    pub const LANE_COUNT: usize = 3;

    /// Canvas CSS width cap (px)
    pub const MAX_CSS_WIDTH: f32 = 900.0;
    /// Horizontal margin kept free around the canvas (px)
    pub const VIEWPORT_MARGIN: f32 = 20.0;

    /// Score submission endpoint
    pub const SCORE_ENDPOINT: &str = "/session/score";
}

/// Clamp a lane index to the valid range
#[inline]
pub fn clamp_lane(lane: i32) -> usize {
    lane.clamp(0, consts::LANE_COUNT as i32 - 1) as usize
}
