//! Overlap tests between the player, creatures, obstacles and tap points

use glam::Vec2;

use super::state::{Creature, Obstacle, Player};

/// Player close enough to a creature to trigger an automatic catch
#[inline]
pub fn player_near_creature(player: &Player, creature: &Creature, max_dx: f32, max_dy: f32) -> bool {
    let d = (player.pos - creature.pos).abs();
    d.x < max_dx && d.y < max_dy
}

/// Point inside a creature's square tap box (edges inclusive)
#[inline]
pub fn point_in_creature(point: Vec2, creature: &Creature) -> bool {
    let half = creature.size / 2.0;
    let d = (point - creature.pos).abs();
    d.x <= half && d.y <= half
}

/// Grounded player sharing the obstacle's lane within vertical tolerance
#[inline]
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle, tolerance: f32) -> bool {
    player.on_ground
        && obstacle.lane == player.lane
        && (player.pos.y - obstacle.pos.y).abs() < tolerance
}

/// Index of the first creature whose tap box contains `point`
pub fn creature_at(creatures: &[Creature], point: Vec2) -> Option<usize> {
    creatures.iter().position(|c| point_in_creature(point, c))
}
