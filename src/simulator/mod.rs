//! Headless runner for balance checks.
//!
//! Plays many games with a simple autopilot and summarizes how long runs
//! last. Uses the same `advance` step as the terminal front end with a
//! fixed nominal frame time, so results are reproducible for a given seed.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{autopilot_wants_jump, run_simulation, simulate_single_run};
