//! Game state and core simulation types
//!
//! Everything the frame update and the input handler mutate lives in `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Target lane (0..=2)
    pub lane: usize,
    /// Feet position; x eases toward the lane centre
    pub pos: Vec2,
    /// Vertical velocity (px/frame, negative is up)
    pub vy: f32,
    pub on_ground: bool,
    pub width: f32,
    pub height: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let lane = 1;
        Self {
            lane,
            pos: Vec2::new(tuning.lane_x(lane), tuning.ground_y()),
            vy: 0.0,
            on_ground: true,
            width: tuning.player_width,
            height: tuning.player_height,
        }
    }

    /// Start a jump. Returns false when already airborne.
    pub fn jump(&mut self, velocity: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = velocity;
        self.on_ground = false;
        true
    }

    /// Integrate gravity and land on the ground line
    pub fn fall(&mut self, gravity: f32, ground_y: f32) {
        self.vy += gravity;
        self.pos.y += self.vy;
        if self.pos.y >= ground_y {
            self.pos.y = ground_y;
            self.vy = 0.0;
            self.on_ground = true;
        }
    }

    /// Ease horizontal position toward a target x
    pub fn ease_toward(&mut self, target_x: f32, factor: f32) {
        self.pos.x += (target_x - self.pos.x) * factor;
    }
}

/// A catchable creature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: u32,
    /// Centre of the body
    pub pos: Vec2,
    pub lane: usize,
    /// Body diameter; also the side of its tap box
    pub size: f32,
}

/// A ground obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Bottom-centre anchor
    pub pos: Vec2,
    pub lane: usize,
    pub width: f32,
    pub height: f32,
}

/// Per-session running totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTotals {
    /// Distance travelled (px)
    pub distance: f64,
    /// Score, never negative
    pub score: f64,
    /// Creatures caught
    pub caught: u32,
    /// Current scroll speed (px/s)
    pub speed: f32,
}

impl SessionTotals {
    pub fn new(start_speed: f32) -> Self {
        Self {
            distance: 0.0,
            score: 0.0,
            caught: 0,
            speed: start_speed,
        }
    }

    /// Add to the score
    pub fn reward(&mut self, amount: f64) {
        self.score += amount;
    }

    /// Subtract from the score, flooring at zero
    pub fn penalize(&mut self, amount: f64) {
        self.score = (self.score - amount).max(0.0);
    }

    /// Score as shown to the player and submitted
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }
}

/// Something noteworthy that happened during a frame or input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CreatureSpawned { id: u32, lane: usize },
    ObstacleSpawned { id: u32, lane: usize },
    CreatureCaught { id: u32, reward: f64, by_tap: bool },
    CatchFailed { id: u32, penalty: f64, by_tap: bool },
    ObstacleHit { id: u32 },
    Jumped,
}

impl GameEvent {
    /// Whether this event changes what the HUD shows
    pub fn touches_hud(&self) -> bool {
        matches!(
            self,
            GameEvent::CreatureCaught { .. }
                | GameEvent::CatchFailed { .. }
                | GameEvent::ObstacleHit { .. }
        )
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance table for this run
    pub tuning: Tuning,
    pub player: Player,
    /// Live creatures in spawn order
    pub creatures: Vec<Creature>,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub totals: SessionTotals,
    /// Milliseconds accumulated toward the next spawn check
    pub spawn_timer_ms: f32,
    /// Session clock (ms of simulated time)
    pub clock_ms: f64,
    /// Frames simulated
    pub frame: u64,
    /// Score or caught count changed since the HUD last looked
    pub hud_dirty: bool,
    /// Events since the frontend last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session
    pub fn new(tuning: Tuning) -> Self {
        Self {
            player: Player::new(&tuning),
            creatures: Vec::new(),
            obstacles: Vec::new(),
            totals: SessionTotals::new(tuning.start_speed),
            spawn_timer_ms: 0.0,
            clock_ms: 0.0,
            frame: 0,
            hud_dirty: true,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Record an event, flagging the HUD when it matters
    pub fn emit(&mut self, event: GameEvent) {
        if event.touches_hud() {
            self.hud_dirty = true;
        }
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Place a creature in a lane at the given height and size
    pub fn spawn_creature(&mut self, lane: usize, y: f32, size: f32) -> u32 {
        let id = self.next_entity_id();
        let lane = lane.min(crate::consts::LANE_COUNT - 1);
        self.creatures.push(Creature {
            id,
            pos: Vec2::new(self.tuning.lane_x(lane), y),
            lane,
            size,
        });
        self.emit(GameEvent::CreatureSpawned { id, lane });
        id
    }

    /// Place an obstacle in a lane on the obstacle line
    pub fn spawn_obstacle(&mut self, lane: usize) -> u32 {
        let id = self.next_entity_id();
        let lane = lane.min(crate::consts::LANE_COUNT - 1);
        self.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(
                self.tuning.lane_x(lane),
                self.tuning.world_height - self.tuning.obstacle_offset,
            ),
            lane,
            width: self.tuning.obstacle_width,
            height: self.tuning.obstacle_height,
        });
        self.emit(GameEvent::ObstacleSpawned { id, lane });
        id
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
