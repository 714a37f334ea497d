//! Simulation configuration.

use crate::core::config::GameConfig;

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of games to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Frames per game before it is cut off
    pub max_frames_per_run: u64,

    /// World geometry and rules for every game
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_frames_per_run: 20_000,
            game: GameConfig::default(),
        }
    }
}
