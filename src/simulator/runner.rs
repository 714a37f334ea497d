//! Batch runner and autopilot.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::core::config::ConfigError;
use crate::core::constants::FRAME_MS;
use crate::game::{advance, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Gap (canvas units) between the player's front edge and an obstacle at
/// which the autopilot flaps. About ten frames of scrolling, which puts the
/// apex of a flap over the obstacle.
const AUTOPILOT_LOOKAHEAD: f64 = 40.0;

/// Play `num_runs` games and summarize them.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, ConfigError> {
    config.game.validate()?;
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng)?;
        tracing::debug!(
            run = run_idx + 1,
            frames = stats.frames,
            score = stats.score,
            hits = stats.hits_taken,
            "run finished"
        );
        runs.push(stats);
    }

    Ok(SimReport::from_runs(
        config.game.rules.name(),
        runs,
        config.max_frames_per_run,
    ))
}

/// Play one game until it ends or reaches the frame cap.
pub fn simulate_single_run<R: Rng>(
    config: &SimConfig,
    rng: &mut R,
) -> Result<RunStats, ConfigError> {
    let mut world = World::new(config.game)?;

    while world.frame_count < config.max_frames_per_run {
        let jump = autopilot_wants_jump(&world);
        let outcome = advance(&mut world, FRAME_MS, jump, rng);
        if outcome.game_over {
            break;
        }
    }

    Ok(RunStats {
        frames: world.frame_count,
        score: world.score,
        distance: world.distance,
        hits_taken: world.hits_taken,
        game_over: world.is_game_over(),
    })
}

/// Flap from the ground when the nearest obstacle ahead is about to arrive.
pub fn autopilot_wants_jump(world: &World) -> bool {
    let player = &world.player;
    if player.airborne {
        return false;
    }

    let front = player.x + player.width;
    world
        .obstacles
        .iter()
        .map(|o| o.x - front)
        .filter(|gap| *gap >= 0.0)
        .any(|gap| gap <= AUTOPILOT_LOOKAHEAD)
}
