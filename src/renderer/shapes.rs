//! Shape generation for 2D primitives
//!
//! Turns a `GameState` into a flat list of fill commands. No platform calls here,
//! so the scene can be inspected natively.

use glam::Vec2;

use crate::sim::{Creature, GameState, Obstacle, Player};

const GROUND_COLOR: &str = "#3a6";
const LANE_COLOR: &str = "rgba(255,255,255,0.06)";
const SHADOW_COLOR: &str = "rgba(0,0,0,0.15)";
const PLAYER_COLOR: &str = "#ffdd55";
const CREATURE_COLOR: &str = "#ff88cc";
const OBSTACLE_COLOR: &str = "#552";
const WHITE: &str = "#fff";
const BLACK: &str = "#000";

/// Height of the ground strip at the bottom of the world
const GROUND_HEIGHT: f32 = 100.0;
/// Lane pad size and its top offset from the bottom edge
const LANE_PAD: Vec2 = Vec2::new(160.0, 60.0);
const LANE_PAD_OFFSET: f32 = 140.0;

/// One filled primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole canvas
    Clear { size: Vec2 },
    Rect { min: Vec2, size: Vec2, color: &'static str },
    RoundRect { min: Vec2, size: Vec2, radius: f32, color: &'static str },
    Ellipse { center: Vec2, radii: Vec2, color: &'static str },
}

/// Full scene for one frame, back to front
pub fn draw_list(state: &GameState) -> Vec<DrawCmd> {
    let tuning = &state.tuning;
    let world = Vec2::new(tuning.world_width, tuning.world_height);
    let mut cmds = Vec::with_capacity(16 + state.creatures.len() * 5 + state.obstacles.len());

    cmds.push(DrawCmd::Clear { size: world });
    cmds.push(DrawCmd::Rect {
        min: Vec2::new(0.0, world.y - GROUND_HEIGHT),
        size: Vec2::new(world.x, GROUND_HEIGHT),
        color: GROUND_COLOR,
    });
    for lane in 0..crate::consts::LANE_COUNT {
        cmds.push(DrawCmd::Rect {
            min: Vec2::new(tuning.lane_x(lane) - LANE_PAD.x / 2.0, world.y - LANE_PAD_OFFSET),
            size: LANE_PAD,
            color: LANE_COLOR,
        });
    }

    player_shapes(&state.player, &mut cmds);
    for creature in &state.creatures {
        creature_shapes(creature, &mut cmds);
    }
    for obstacle in &state.obstacles {
        obstacle_shapes(obstacle, &mut cmds);
    }
    cmds
}

/// Player body anchored at the feet
fn player_shapes(player: &Player, cmds: &mut Vec<DrawCmd>) {
    let at = player.pos;
    let (w, h) = (player.width, player.height);

    cmds.push(DrawCmd::Ellipse {
        center: at + Vec2::new(0.0, h / 2.0 + 8.0),
        radii: Vec2::new(28.0, 10.0),
        color: SHADOW_COLOR,
    });
    cmds.push(DrawCmd::RoundRect {
        min: at + Vec2::new(-w / 2.0, -h),
        size: Vec2::new(w, h),
        radius: 8.0,
        color: PLAYER_COLOR,
    });
    // Face and eyes
    cmds.push(DrawCmd::Rect {
        min: at + Vec2::new(-12.0, -h + 10.0),
        size: Vec2::new(24.0, 20.0),
        color: WHITE,
    });
    for eye_x in [-6.0, 2.0] {
        cmds.push(DrawCmd::Rect {
            min: at + Vec2::new(eye_x, -h + 16.0),
            size: Vec2::splat(4.0),
            color: BLACK,
        });
    }
}

/// Round creature with two eyes
fn creature_shapes(creature: &Creature, cmds: &mut Vec<DrawCmd>) {
    let at = creature.pos;
    let s = creature.size;

    cmds.push(DrawCmd::Ellipse {
        center: at,
        radii: Vec2::splat(s / 2.0),
        color: CREATURE_COLOR,
    });
    for side in [-1.0, 1.0] {
        cmds.push(DrawCmd::Ellipse {
            center: at + Vec2::new(side * s * 0.12, -s * 0.12),
            radii: Vec2::splat(s * 0.12),
            color: WHITE,
        });
    }
    for pupil_x in [-6.0, 4.0] {
        cmds.push(DrawCmd::Rect {
            min: at + Vec2::new(pupil_x, -6.0),
            size: Vec2::splat(3.0),
            color: BLACK,
        });
    }
}

/// Block anchored at its bottom centre
fn obstacle_shapes(obstacle: &Obstacle, cmds: &mut Vec<DrawCmd>) {
    cmds.push(DrawCmd::RoundRect {
        min: obstacle.pos + Vec2::new(-obstacle.width / 2.0, -obstacle.height),
        size: Vec2::new(obstacle.width, obstacle.height),
        radius: 6.0,
        color: OBSTACLE_COLOR,
    });
}
