//! Runtime configuration: canvas geometry and the active rule set.
//!
//! The two shipped rule sets differ at three fork points (spawn policy,
//! collision response, jump policy). Each fork is its own enum so a config
//! file can mix them, and the presets name the two canonical combinations.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("canvas {name} must be a positive finite number, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("playable height is {ground_y} (canvas height {canvas_height} minus {margin} ground margin); it must be positive")]
    NonPositivePlayableHeight {
        canvas_height: f64,
        ground_y: f64,
        margin: f64,
    },

    #[error("spawn {name} must be within {range}, got {value}")]
    InvalidSpawnRule {
        name: &'static str,
        range: &'static str,
        value: f64,
    },

    #[error("unknown rule set '{0}' (expected 'classic' or 'arcade')")]
    UnknownRuleSet(String),

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// When new obstacles and items enter the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Spawn once enough elapsed time has passed since the previous spawn.
    Timed {
        obstacle_interval_ms: f64,
        item_interval_ms: f64,
    },
    /// Independent per-frame Bernoulli trials.
    Chance {
        obstacle_chance: f64,
        item_chance: f64,
    },
}

impl SpawnPolicy {
    pub fn timed() -> Self {
        Self::Timed {
            obstacle_interval_ms: OBSTACLE_SPAWN_INTERVAL_MS,
            item_interval_ms: ITEM_SPAWN_INTERVAL_MS,
        }
    }

    pub fn chance() -> Self {
        Self::Chance {
            obstacle_chance: OBSTACLE_SPAWN_CHANCE,
            item_chance: ITEM_SPAWN_CHANCE,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Timed {
                obstacle_interval_ms,
                item_interval_ms,
            } => {
                check_interval("obstacle_interval_ms", obstacle_interval_ms)?;
                check_interval("item_interval_ms", item_interval_ms)
            }
            Self::Chance {
                obstacle_chance,
                item_chance,
            } => {
                check_chance("obstacle_chance", obstacle_chance)?;
                check_chance("item_chance", item_chance)
            }
        }
    }

    /// Distance is only meaningful when the world advances on wall time.
    pub fn tracks_distance(&self) -> bool {
        matches!(self, Self::Timed { .. })
    }
}

fn check_interval(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpawnRule {
            name,
            range: "[0, inf)",
            value,
        })
    }
}

fn check_chance(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpawnRule {
            name,
            range: "[0, 1]",
            value,
        })
    }
}

/// What happens when the player touches an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Lose one health point per hit; game over at zero.
    Health,
    /// First hit ends the game.
    SingleHit,
}

impl CollisionPolicy {
    /// Heal items only exist where there is health to restore.
    pub fn heal_item_chance(&self) -> f64 {
        match self {
            Self::Health => HEAL_ITEM_CHANCE,
            Self::SingleHit => 0.0,
        }
    }
}

/// When a jump request is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpPolicy {
    /// Every request flaps, airborne or not.
    MultiFlap,
    /// Requests are ignored until the player lands again.
    SingleFlap,
}

/// One choice per fork point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub spawn: SpawnPolicy,
    pub collision: CollisionPolicy,
    pub jump: JumpPolicy,
}

impl RuleSet {
    /// Timed spawning, three hit points with heal items, repeated flaps.
    pub fn classic() -> Self {
        Self {
            spawn: SpawnPolicy::timed(),
            collision: CollisionPolicy::Health,
            jump: JumpPolicy::MultiFlap,
        }
    }

    /// Random spawning, one hit ends the run, one flap per landing.
    pub fn arcade() -> Self {
        Self {
            spawn: SpawnPolicy::chance(),
            collision: CollisionPolicy::SingleHit,
            jump: JumpPolicy::SingleFlap,
        }
    }

    pub fn name(&self) -> &'static str {
        if *self == Self::classic() {
            "classic"
        } else if *self == Self::arcade() {
            "arcade"
        } else {
            "custom"
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::classic()
    }
}

impl FromStr for RuleSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::classic()),
            "arcade" => Ok(Self::arcade()),
            other => Err(ConfigError::UnknownRuleSet(other.to_string())),
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canvas geometry and rules, read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub rules: RuleSet,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            rules: RuleSet::default(),
        }
    }
}

impl GameConfig {
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    /// Y coordinate of the ground line.
    pub fn ground_y(&self) -> f64 {
        self.canvas_height - GROUND_MARGIN
    }

    /// Reject geometry the simulation cannot run in.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("width", self.canvas_width), ("height", self.canvas_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }

        let ground_y = self.ground_y();
        if ground_y <= 0.0 {
            return Err(ConfigError::NonPositivePlayableHeight {
                canvas_height: self.canvas_height,
                ground_y,
                margin: GROUND_MARGIN,
            });
        }

        self.rules.spawn.validate()
    }

    /// Read a config file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        Ok(config)
    }
}
