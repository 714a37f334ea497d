//! Side-scroller data structures.
//!
//! A player flaps over obstacles scrolling in from the right and collects
//! floating items. Everything lives in one owned [`World`].

use crate::core::config::{ConfigError, GameConfig};
use crate::core::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The controllable sprite. The x position never changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    /// Top edge (y grows downward).
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity in units/frame (negative = upward).
    pub vy: f64,
    /// Set by a flap, cleared on landing.
    pub airborne: bool,
}

impl Player {
    /// A player standing on the ground line.
    pub fn on_ground(ground_y: f64) -> Self {
        Self {
            x: PLAYER_X,
            y: ground_y - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            vy: 0.0,
            airborne: false,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// An axis-aligned hazard anchored to the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    /// Fully past the left edge.
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width <= 0.0
    }
}

/// A floating collectable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Centre x.
    pub x: f64,
    /// Centre y.
    pub y: f64,
    pub radius: f64,
    /// Restores health instead of awarding score.
    pub heal: bool,
}

impl Item {
    pub fn is_off_screen(&self) -> bool {
        self.x + self.radius <= 0.0
    }
}

/// Spawn timestamps on the world clock (timed spawn policy).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnClock {
    /// Total elapsed milliseconds since the world started.
    pub elapsed_ms: f64,
    pub last_obstacle_ms: f64,
    pub last_item_ms: f64,
}

/// Macro state. GameOver is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Running,
    GameOver,
}

/// Everything the simulation owns.
#[derive(Debug, Clone)]
pub struct World {
    pub config: GameConfig,
    /// Cached `config.ground_y()`.
    pub ground_y: f64,

    pub player: Player,
    /// Active obstacles in spawn order.
    pub obstacles: Vec<Obstacle>,
    /// Active items in spawn order.
    pub items: Vec<Item>,

    pub score: u32,
    pub health: u32,
    /// Distance traveled (timed spawn policy only).
    pub distance: f64,
    pub phase: Phase,

    pub clock: SpawnClock,
    /// Jump requested since the last step.
    pub jump_pending: bool,
    /// Steps taken so far.
    pub frame_count: u64,
    /// Obstacles that hit the player.
    pub hits_taken: u32,
}

impl World {
    /// Build a fresh world, refusing geometry the simulation cannot run in.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ground_y = config.ground_y();

        tracing::info!(
            width = config.canvas_width,
            height = config.canvas_height,
            ground_y,
            rules = %config.rules,
            "world created"
        );

        Ok(Self {
            config,
            ground_y,
            player: Player::on_ground(ground_y),
            obstacles: Vec::new(),
            items: Vec::new(),
            score: 0,
            health: MAX_HEALTH,
            distance: 0.0,
            phase: Phase::Running,
            clock: SpawnClock::default(),
            jump_pending: false,
            frame_count: 0,
            hits_taken: 0,
        })
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// X coordinate where new entities enter.
    pub fn spawn_x(&self) -> f64 {
        self.config.canvas_width + SPAWN_X_OFFSET
    }

    /// Add an obstacle of random size at the right edge, resting on the ground.
    pub fn spawn_obstacle<R: Rng>(&mut self, rng: &mut R) {
        let height = OBSTACLE_MIN_HEIGHT + rng.gen::<f64>() * OBSTACLE_HEIGHT_SPAN;
        let width = OBSTACLE_MIN_WIDTH + rng.gen::<f64>() * OBSTACLE_WIDTH_SPAN;
        let obstacle = Obstacle {
            x: self.spawn_x(),
            y: self.ground_y - height,
            width,
            height,
        };
        tracing::debug!(width, height, "obstacle spawned");
        self.obstacles.push(obstacle);
    }

    /// Add an item floating in the band above the ground.
    pub fn spawn_item<R: Rng>(&mut self, rng: &mut R) {
        let heal = rng.gen_bool(self.config.rules.collision.heal_item_chance());
        let item = Item {
            x: self.spawn_x(),
            y: self.ground_y - ITEM_MIN_LIFT - rng.gen::<f64>() * ITEM_LIFT_SPAN,
            radius: ITEM_RADIUS,
            heal,
        };
        tracing::debug!(y = item.y, heal, "item spawned");
        self.items.push(item);
    }
}
